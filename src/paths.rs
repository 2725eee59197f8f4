//! Builders for SVG path-data fragments.
//!
//! Every builder returns a self-delimiting fragment (leading and trailing
//! whitespace included) so fragments can be concatenated directly.

/// A coordinate pair used inside curve and line commands.
pub fn point(x: f64, y: f64) -> String {
    format!(" {x},{y} ")
}

/// Curve command (`c`, `C`, `s`, `S`, `q`, ...) over the given points.
pub fn curve(command: &str, points: &[String]) -> String {
    format!(" {command}{}", points.concat())
}

pub fn move_to(x: f64, y: f64) -> String {
    format!(" M {x},{y} ")
}

pub fn move_by(dx: f64, dy: f64) -> String {
    format!(" m {dx},{dy} ")
}

pub fn line_to(dx: f64, dy: f64) -> String {
    format!(" l {dx},{dy} ")
}

/// Relative polyline through the given points.
pub fn line(points: &[String]) -> String {
    format!(" l{}", points.concat())
}

/// Single-axis line: `h`/`H` for horizontal, `v`/`V` for vertical.
pub fn line_on_axis(command: &str, value: f64) -> String {
    format!(" {command} {value} ")
}

/// Elliptical arc with equal radii. `flags` holds the rotation, large-arc
/// and sweep flags, e.g. `"0 0,1"`.
pub fn arc(command: &str, flags: &str, radius: f64, point: &str) -> String {
    format!("{command} {radius} {radius} {flags}{point}")
}
