use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::Config;
use crate::error::Error;
use crate::id::Id;
use crate::node::Node;

/// Node index of the virtual source.
pub const SOURCE: usize = 0;

/// The ordered roster of a group, mapping each participant to a flow network node index.
///
/// Index `0` is the source, `1..=n` are the participants in roster order and `n + 1` is the sink.
#[derive(Clone, Debug)]
pub struct Participants<AccountId> {
    ids: Vec<AccountId>,
    index: BTreeMap<AccountId, usize>,
}

impl<AccountId: Id> Participants<AccountId> {
    pub fn new(ids: Vec<AccountId>) -> Result<Self, Error> {
        if ids.is_empty() {
            return Err(Error::NoParticipants);
        }

        let mut index = BTreeMap::new();
        for (pos, id) in ids.iter().enumerate() {
            if index.insert(id.clone(), pos + 1).is_some() {
                return Err(Error::DuplicateParticipant(format!("{id:?}")));
            }
        }

        Ok(Self { ids, index })
    }

    /// Number of real participants `n`.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Total node count of the flow network, `n + 2`.
    pub fn node_count(&self) -> usize {
        self.ids.len() + 2
    }

    pub fn source(&self) -> usize {
        SOURCE
    }

    pub fn sink(&self) -> usize {
        self.ids.len() + 1
    }

    pub fn ids(&self) -> &[AccountId] {
        &self.ids
    }

    pub fn index_of(&self, id: &AccountId) -> Result<usize, Error> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownParticipant(format!("{id:?}")))
    }

    pub fn node(&self, idx: usize) -> Option<Node<&AccountId>> {
        match idx {
            SOURCE => Some(Node::Source),
            i if i == self.sink() => Some(Node::Sink),
            i => self.ids.get(i - 1).map(Node::WithId),
        }
    }

    /// Resolves a node index that must denote a real participant.
    pub fn participant(&self, idx: usize) -> Result<&AccountId, Error> {
        self.node(idx)
            .as_ref()
            .and_then(Node::as_option)
            .copied()
            .ok_or(Error::UnmappedNode(idx))
    }

    /// Human readable label of a node, using the configured sentinel labels.
    pub fn label(&self, idx: usize, config: &Config) -> String {
        match self.node(idx) {
            Some(Node::Source) => config.source_label.clone(),
            Some(Node::Sink) => config.sink_label.clone(),
            Some(Node::WithId(id)) => format!("{id:?}"),
            None => format!("#{idx}"),
        }
    }
}
