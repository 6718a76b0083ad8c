use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ApiError, Result};

/// Ordered base URLs for one logical service.
///
/// `current` points at the candidate most recently attempted. It is shared by
/// every call through the owning client and the last writer wins.
#[derive(Debug)]
pub struct CandidateEndpoints {
    urls: Vec<String>,
    current: AtomicUsize,
}

impl CandidateEndpoints {
    pub fn new<I, S>(urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls
            .into_iter()
            .map(|url| url.into().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if urls.is_empty() {
            return Err(ApiError::NoCandidates);
        }
        Ok(Self {
            urls,
            current: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.urls.len() - 1
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn current_index(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn current_url(&self) -> &str {
        &self.urls[self.current_index()]
    }

    /// Mark `index` as current and return its URL
    pub(crate) fn select(&self, index: usize) -> &str {
        let index = index.min(self.last_index());
        self.current.store(index, Ordering::SeqCst);
        &self.urls[index]
    }
}
