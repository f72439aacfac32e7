//! Intents understood by the page store.
//!
//! Five user operations map onto one [`PageIntent`]: which page to request ([`PageTarget`]) and
//! what to do with the answer ([`MergeMode`]).

/// Which page a navigation requests, relative to the state at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    /// Page 1 under a new keyword. Empty keyword means no filter.
    First { keyword: String },
    /// `current_page + 1`.
    Next,
    /// `current_page - 1`, never below page 1.
    Previous,
    /// `total_pages`.
    Last,
}

/// How a fetched page is merged into the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// The page's items become the whole list.
    Replace,
    /// The page's items are appended after the current list (infinite scroll).
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIntent {
    pub target: PageTarget,
    pub merge: MergeMode,
}

impl PageIntent {
    pub fn first(keyword: impl Into<String>) -> Self {
        Self {
            target: PageTarget::First {
                keyword: keyword.into(),
            },
            merge: MergeMode::Replace,
        }
    }

    pub fn next() -> Self {
        Self {
            target: PageTarget::Next,
            merge: MergeMode::Replace,
        }
    }

    pub fn previous() -> Self {
        Self {
            target: PageTarget::Previous,
            merge: MergeMode::Replace,
        }
    }

    pub fn last() -> Self {
        Self {
            target: PageTarget::Last,
            merge: MergeMode::Replace,
        }
    }

    pub fn append_next() -> Self {
        Self {
            target: PageTarget::Next,
            merge: MergeMode::Append,
        }
    }
}
