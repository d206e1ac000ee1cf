use indexmap::IndexMap;
use models::requester::Requester;
use serde_json::Value;
use uuid::Uuid;

/// Caller-supplied, read-only data available to validators for one validation call
#[derive(Clone, Debug, Default)]
pub struct ValidationContext {
    requester: Option<Requester>,
    instance_id: Option<Uuid>,
    values: IndexMap<String, Value>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requester(mut self, requester: Requester) -> Self {
        self.requester = Some(requester);
        self
    }

    /// Marks the call as an update of an existing record
    pub fn for_instance(mut self, id: Uuid) -> Self {
        self.instance_id = Some(id);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn requester(&self) -> Option<&Requester> {
        self.requester.as_ref()
    }

    pub fn instance_id(&self) -> Option<Uuid> {
        self.instance_id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}
