use crate::stroke::Stroke;

/// Whether the pointer is currently painting
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Idle,
    Drawing {
        stroke: Stroke,
    },
}

impl EditorState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        match self {
            Self::Drawing { stroke } => Some(stroke),
            Self::Idle => None,
        }
    }

    pub fn stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            Self::Drawing { stroke } => Some(stroke),
            Self::Idle => None,
        }
    }

    /// Ends any stroke and hands it back
    pub fn finish(&mut self) -> Option<Stroke> {
        match std::mem::take(self) {
            Self::Drawing { stroke } => Some(stroke),
            Self::Idle => None,
        }
    }
}
