use std::sync::Arc;

/// One unit of load: `repeat` sequential queries for a single name.
///
/// The name is kept as given; it is re-normalized on every iteration.
#[derive(Debug, Clone)]
pub struct QueryJob {
    pub index: usize,
    pub name: Arc<str>,
    pub repeat: u32,
}

impl QueryJob {
    pub fn new(index: usize, name: impl Into<Arc<str>>, repeat: u32) -> Self {
        Self {
            index,
            name: name.into(),
            repeat,
        }
    }

    /// One job per input name, duplicates included.
    pub fn from_names(names: &[String], repeat: u32) -> Vec<Self> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Self::new(index, name.as_str(), repeat))
            .collect()
    }
}
