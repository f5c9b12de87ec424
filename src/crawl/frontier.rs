// src/crawl/frontier.rs
// =============================================================================
// The frontier: the URLs waiting to be fetched at the current depth.
//
// It is a single slot. The controller puts one batch in, takes it out to run
// a round, and only then puts the next batch in. Two rounds can never be
// queued at once, which is what keeps the crawl strictly breadth-first.
//
// The controller is the only producer and the only consumer, so waiting on an
// empty slot could never be woken up. Putting into a full slot or taking from
// an empty one is reported as an error instead.
// =============================================================================

use thiserror::Error;
use url::Url;

/// The URLs of one depth level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierBatch {
    /// Levels left to crawl, this one included
    pub depth_remaining: usize,
    pub urls: Vec<Url>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    #[error("frontier already holds the batch for depth {0}")]
    Occupied(usize),
    #[error("frontier is empty")]
    Empty,
}

#[derive(Debug, Default)]
pub struct Frontier {
    slot: Option<FrontierBatch>,
    batches_put: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, batch: FrontierBatch) -> Result<(), FrontierError> {
        if let Some(queued) = &self.slot {
            return Err(FrontierError::Occupied(queued.depth_remaining));
        }
        self.slot = Some(batch);
        self.batches_put += 1;
        Ok(())
    }

    pub fn take(&mut self) -> Result<FrontierBatch, FrontierError> {
        self.slot.take().ok_or(FrontierError::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// How many batches were ever enqueued, seed batch included
    pub fn batches_put(&self) -> usize {
        self.batches_put
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(depth: usize, urls: &[&str]) -> FrontierBatch {
        FrontierBatch {
            depth_remaining: depth,
            urls: urls.iter().map(|u| Url::parse(u).unwrap()).collect(),
        }
    }

    #[test]
    fn test_put_then_take() {
        let mut frontier = Frontier::new();
        frontier.put(batch(2, &["https://a.test/"])).unwrap();

        assert!(!frontier.is_empty());
        assert_eq!(frontier.take().unwrap(), batch(2, &["https://a.test/"]));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_single_slot_refuses_second_batch() {
        let mut frontier = Frontier::new();
        frontier.put(batch(2, &["https://a.test/"])).unwrap();

        let err = frontier.put(batch(1, &["https://b.test/"])).unwrap_err();
        assert_eq!(err, FrontierError::Occupied(2));
        assert_eq!(frontier.batches_put(), 1);
    }

    #[test]
    fn test_take_from_empty_frontier() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.take(), Err(FrontierError::Empty));
    }

    #[test]
    fn test_batch_order_is_kept() {
        let mut frontier = Frontier::new();
        frontier
            .put(batch(1, &["https://c.test/", "https://a.test/", "https://c.test/"]))
            .unwrap();

        let urls: Vec<_> = frontier.take().unwrap().urls.into_iter().map(String::from).collect();
        assert_eq!(urls, ["https://c.test/", "https://a.test/", "https://c.test/"]);
    }
}
