/// Describes how the edges of the field behave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Edges of the field are absent: off-grid neighbors are not counted.
    #[default]
    Bounded,
    /// Bounds of the field are stitched together.
    Torus,
}

impl Topology {
    pub fn from_toroidal(toroidal: bool) -> Self {
        if toroidal {
            Self::Torus
        } else {
            Self::Bounded
        }
    }

    pub fn is_toroidal(self) -> bool {
        self == Self::Torus
    }
}
