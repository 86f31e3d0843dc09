//! Test doubles shared by the unit tests of this crate.

use crate::errors::PersistenceError;
use crate::id_type::{Identifiable, Identifier};
use crate::ordering::{Sort, SortOrder};
use crate::traits::{Dao, FilterDao, KeyValueDao};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Widget {
    pub id: Option<u32>,
    pub name: String,
}

impl Widget {
    pub fn new(id: Option<u32>, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl Identifiable for Widget {
    type Key = u32;

    fn id(&self) -> Option<Identifier<Self>> {
        self.id.map(Identifier::new)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Get(u32),
    Add(Widget),
    Update(Widget),
    Delete(u32),
    Exists(u32),
    GetAll,
    Size,
    Clear,
    Find(String, Vec<(&'static str, SortOrder)>),
    Count(String),
    DeleteWhere(String),
}

/// Records every call and answers with scripted values
#[derive(Default)]
pub(crate) struct RecordingDao {
    calls: Mutex<Vec<Call>>,
    /// Returned by `get`, `add` and `update` when set; otherwise they echo their input
    pub answer: Option<Widget>,
    pub exists: bool,
    pub fail: bool,
}

impl RecordingDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(widget: Widget) -> Self {
        Self {
            answer: Some(widget),
            ..Self::default()
        }
    }

    /// Answers `get` with `widget` and `exists` with `exists`
    pub fn with(widget: Widget, exists: bool) -> Self {
        Self {
            answer: Some(widget),
            exists,
            ..Self::default()
        }
    }

    pub fn existing() -> Self {
        Self {
            exists: true,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), PersistenceError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(PersistenceError::Backend("scripted failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Dao for RecordingDao {
    type Context = ();
    type Entity = Widget;

    async fn get(&self, id: &Identifier<Widget>, _ctx: &mut ()) -> Result<Option<Widget>, PersistenceError> {
        self.record(Call::Get(*id.raw()))?;
        Ok(self.answer.clone())
    }

    async fn add(&self, entity: &Widget, _ctx: &mut ()) -> Result<Widget, PersistenceError> {
        self.record(Call::Add(entity.clone()))?;
        Ok(self.answer.clone().unwrap_or_else(|| entity.clone()))
    }

    async fn update(&self, entity: &Widget, _ctx: &mut ()) -> Result<Widget, PersistenceError> {
        self.record(Call::Update(entity.clone()))?;
        Ok(self.answer.clone().unwrap_or_else(|| entity.clone()))
    }

    async fn delete(&self, id: &Identifier<Widget>, _ctx: &mut ()) -> Result<bool, PersistenceError> {
        self.record(Call::Delete(*id.raw()))?;
        Ok(self.exists)
    }

    async fn exists(&self, id: &Identifier<Widget>, _ctx: &mut ()) -> Result<bool, PersistenceError> {
        self.record(Call::Exists(*id.raw()))?;
        Ok(self.exists)
    }
}

#[async_trait]
impl KeyValueDao for RecordingDao {
    async fn get_all(&self, _ctx: &mut ()) -> Result<Vec<Widget>, PersistenceError> {
        self.record(Call::GetAll)?;
        Ok(self.answer.clone().into_iter().collect())
    }

    async fn size(&self, _ctx: &mut ()) -> Result<u64, PersistenceError> {
        self.record(Call::Size)?;
        Ok(u64::from(self.answer.is_some()))
    }

    async fn clear(&self, _ctx: &mut ()) -> Result<(), PersistenceError> {
        self.record(Call::Clear)
    }
}

#[async_trait]
impl FilterDao for RecordingDao {
    type Filter = String;
    type SortKey = &'static str;

    async fn find(
        &self,
        filter: &String,
        sort: &Sort<&'static str>,
        _ctx: &mut (),
    ) -> Result<Vec<Widget>, PersistenceError> {
        let sort = sort.iter().map(|field| (field.key, field.order)).collect();
        self.record(Call::Find(filter.clone(), sort))?;
        Ok(self.answer.clone().into_iter().collect())
    }

    async fn count(&self, filter: &String, _ctx: &mut ()) -> Result<u64, PersistenceError> {
        self.record(Call::Count(filter.clone()))?;
        Ok(3)
    }

    async fn delete_where(&self, filter: &String, _ctx: &mut ()) -> Result<u64, PersistenceError> {
        self.record(Call::DeleteWhere(filter.clone()))?;
        Ok(2)
    }
}
