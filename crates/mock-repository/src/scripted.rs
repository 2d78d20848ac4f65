//! Scripted repository - replays queued responses in order.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alert_core::{async_trait, ensure_not_blank, AlertError, AlertRepository, Region};

/// A scripted step: a value or a request failure with an optional HTTP status.
#[derive(Debug, Clone)]
enum Step<T> {
    Value(T),
    Failure(Option<u16>),
}

impl<T: Clone> Step<T> {
    fn resolve(&self) -> Result<T, AlertError> {
        match self {
            Step::Value(value) => Ok(value.clone()),
            Step::Failure(status) => Err(AlertError::Request {
                status: *status,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

/// Queue of steps where the final step repeats once the others are consumed.
#[derive(Debug)]
struct Script<T> {
    steps: Mutex<VecDeque<Step<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn push(&mut self, step: Step<T>) {
        self.steps
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(step);
    }

    fn next(&self, what: &str) -> Result<T, AlertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut steps = self.steps.lock().unwrap_or_else(|e| e.into_inner());
        let step = if steps.len() > 1 {
            steps.pop_front()
        } else {
            steps.front().cloned()
        };

        match step {
            Some(step) => step.resolve(),
            None => Err(AlertError::transport(format!("no scripted {} response", what))),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A repository that replays scripted responses.
///
/// Single-region and last-action-index queries consume their scripts in
/// order; the last scripted step repeats forever. Collection queries return
/// fixed lists.
///
/// # Example
///
/// ```rust
/// use mock_repository::{fixtures, ScriptedRepository};
///
/// let repository = ScriptedRepository::new()
///     .then_index(0)
///     .then_index(20)
///     .with_all_regions(vec![fixtures::quiet_region("14", "Kyiv")]);
/// ```
#[derive(Debug)]
pub struct ScriptedRepository {
    regions: Script<Region>,
    indexes: Script<i64>,
    all_regions: Vec<Region>,
    regions_with_alert: Vec<Region>,
    collection_calls: AtomicUsize,
}

impl ScriptedRepository {
    /// Create an empty script. Unscripted queries fail with a request failure.
    pub fn new() -> Self {
        Self {
            regions: Script::new(),
            indexes: Script::new(),
            all_regions: Vec::new(),
            regions_with_alert: Vec::new(),
            collection_calls: AtomicUsize::new(0),
        }
    }

    /// Queue a region response for `get_region`.
    pub fn then_region(mut self, region: Region) -> Self {
        self.regions.push(Step::Value(region));
        self
    }

    /// Queue a request failure for `get_region`.
    pub fn then_region_failure(mut self, status: Option<u16>) -> Self {
        self.regions.push(Step::Failure(status));
        self
    }

    /// Queue a value for `get_last_action_index`.
    pub fn then_index(mut self, index: i64) -> Self {
        self.indexes.push(Step::Value(index));
        self
    }

    /// Queue a request failure for `get_last_action_index`.
    pub fn then_index_failure(mut self, status: Option<u16>) -> Self {
        self.indexes.push(Step::Failure(status));
        self
    }

    /// Set the list returned by `get_all_regions`.
    pub fn with_all_regions(mut self, regions: Vec<Region>) -> Self {
        self.all_regions = regions;
        self
    }

    /// Set the list returned by `get_regions_with_alert`.
    pub fn with_regions_with_alert(mut self, regions: Vec<Region>) -> Self {
        self.regions_with_alert = regions;
        self
    }

    /// Number of `get_region` calls so far.
    pub fn region_calls(&self) -> usize {
        self.regions.calls()
    }

    /// Number of `get_last_action_index` calls so far.
    pub fn index_calls(&self) -> usize {
        self.indexes.calls()
    }

    /// Number of collection queries so far.
    pub fn collection_calls(&self) -> usize {
        self.collection_calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertRepository for ScriptedRepository {
    async fn get_region(&self, name: &str) -> Result<Region, AlertError> {
        ensure_not_blank("region_name", name)?;
        self.regions.next("region")
    }

    async fn get_all_regions(&self) -> Result<Vec<Region>, AlertError> {
        self.collection_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.all_regions.clone())
    }

    async fn get_regions_with_alert(&self) -> Result<Vec<Region>, AlertError> {
        self.collection_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.regions_with_alert.clone())
    }

    async fn get_last_action_index(&self) -> Result<i64, AlertError> {
        self.indexes.next("index")
    }
}
