use crate::id::Id;

/// A vertex of the settlement flow network.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug)]
pub enum Node<Id> {
    Source,
    Sink,
    WithId(Id),
}

impl<Id> Node<Id> {
    pub fn as_option(&self) -> Option<&Id> {
        match self {
            Self::WithId(id) => Some(id),
            Self::Source | Self::Sink => None,
        }
    }
}

impl<I> From<I> for Node<I>
where
    I: Id,
{
    fn from(id: I) -> Self {
        Self::WithId(id)
    }
}
