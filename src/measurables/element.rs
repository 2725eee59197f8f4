use super::{ConnectionMeasurable, Field, InRowSpacer, InputConnection, Measurable, Types};

/// One entry of a row. Dispatch on [`Element::types`] where a role test is
/// enough; match on the variant only to reach kind-specific data.
#[derive(Debug)]
pub enum Element<'a> {
    Field(Field<'a>),
    Spacer(InRowSpacer),
    Input(InputConnection<'a>),
    Connection(ConnectionMeasurable<'a>),
    /// Corners, hats and jagged edges: size and roles only.
    Shape(Measurable),
}

impl<'a> Element<'a> {
    pub fn base(&self) -> &Measurable {
        match self {
            Self::Field(field) => &field.base,
            Self::Spacer(spacer) => &spacer.base,
            Self::Input(input) => &input.base,
            Self::Connection(connection) => &connection.base,
            Self::Shape(shape) => shape,
        }
    }

    pub fn base_mut(&mut self) -> &mut Measurable {
        match self {
            Self::Field(field) => &mut field.base,
            Self::Spacer(spacer) => &mut spacer.base,
            Self::Input(input) => &mut input.base,
            Self::Connection(connection) => &mut connection.base,
            Self::Shape(shape) => shape,
        }
    }

    pub fn types(&self) -> Types {
        self.base().types
    }

    pub fn width(&self) -> f64 {
        self.base().width
    }

    pub fn height(&self) -> f64 {
        self.base().height
    }

    pub fn as_field(&self) -> Option<&Field<'a>> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&InputConnection<'a>> {
        match self {
            Self::Input(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut InputConnection<'a>> {
        match self {
            Self::Input(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_connection(&self) -> Option<&ConnectionMeasurable<'a>> {
        match self {
            Self::Connection(connection) => Some(connection),
            _ => None,
        }
    }

    /// Editable flag for fields; `false` for everything else.
    pub fn is_editable_field(&self) -> bool {
        self.as_field().is_some_and(|field| field.is_editable)
    }
}

impl From<InRowSpacer> for Element<'_> {
    fn from(spacer: InRowSpacer) -> Self {
        Self::Spacer(spacer)
    }
}

impl From<Measurable> for Element<'_> {
    fn from(shape: Measurable) -> Self {
        Self::Shape(shape)
    }
}

impl<'a> From<Field<'a>> for Element<'a> {
    fn from(field: Field<'a>) -> Self {
        Self::Field(field)
    }
}

impl<'a> From<InputConnection<'a>> for Element<'a> {
    fn from(input: InputConnection<'a>) -> Self {
        Self::Input(input)
    }
}

impl<'a> From<ConnectionMeasurable<'a>> for Element<'a> {
    fn from(connection: ConnectionMeasurable<'a>) -> Self {
        Self::Connection(connection)
    }
}
