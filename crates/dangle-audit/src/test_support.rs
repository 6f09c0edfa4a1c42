//! Scripted record-set source for tests.

use async_trait::async_trait;
use dangle_core::{
    DangleError, ListRecordSetsRequest, RecordSetPage, RecordSetSource, ResourceRecordSet, Result,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned responses and remembers every request
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<RecordSetPage>>>,
    requests: Mutex<Vec<ListRecordSetsRequest>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<RecordSetPage>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ListRecordSetsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSetSource for ScriptedSource {
    async fn list_record_sets(&self, request: &ListRecordSetsRequest) -> Result<RecordSetPage> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DangleError::Internal("script exhausted".into())))
    }
}

/// A page; `next` is `(name, type, identifier)` of the following page
pub fn page(
    records: Vec<ResourceRecordSet>,
    next: Option<(&str, &str, Option<&str>)>,
) -> RecordSetPage {
    RecordSetPage {
        resource_record_sets: records,
        is_truncated: next.is_some(),
        next_record_name: next.map(|(name, _, _)| name.to_string()),
        next_record_type: next.map(|(_, ty, _)| ty.to_string()),
        next_record_identifier: next.and_then(|(_, _, id)| id.map(String::from)),
    }
}

/// `A` record `<label>.example.com.` pointing at `ip`
pub fn a_record(label: &str, ip: &str) -> ResourceRecordSet {
    ResourceRecordSet::literal(format!("{label}.example.com."), "A", [ip])
}
