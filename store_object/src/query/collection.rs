//! Whole-collection query objects for key-value style DAOs

use super::Query;
use crate::errors::PersistenceError;
use crate::traits::KeyValueDao;
use async_trait::async_trait;

pub struct GetAllQuery<'a, D> {
    dao: &'a D,
}

impl<'a, D: KeyValueDao> GetAllQuery<'a, D> {
    pub fn new(dao: &'a D) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl<D: KeyValueDao> Query<D::Context> for GetAllQuery<'_, D> {
    type Output = Vec<D::Entity>;

    fn name(&self) -> &'static str {
        "get_all"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<Self::Output, PersistenceError> {
        self.dao.get_all(ctx).await
    }
}

pub struct SizeQuery<'a, D> {
    dao: &'a D,
}

impl<'a, D: KeyValueDao> SizeQuery<'a, D> {
    pub fn new(dao: &'a D) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl<D: KeyValueDao> Query<D::Context> for SizeQuery<'_, D> {
    type Output = u64;

    fn name(&self) -> &'static str {
        "size"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<u64, PersistenceError> {
        self.dao.size(ctx).await
    }
}

pub struct ClearQuery<'a, D> {
    dao: &'a D,
}

impl<'a, D: KeyValueDao> ClearQuery<'a, D> {
    pub fn new(dao: &'a D) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl<D: KeyValueDao> Query<D::Context> for ClearQuery<'_, D> {
    type Output = ();

    fn name(&self) -> &'static str {
        "clear"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<(), PersistenceError> {
        self.dao.clear(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, RecordingDao, Widget};

    #[tokio::test]
    async fn test_clear_invokes_dao_once() {
        let dao = RecordingDao::new();
        let outcome: Result<(), PersistenceError> = ClearQuery::new(&dao).execute(&mut ()).await;
        assert!(outcome.is_ok());
        assert_eq!(dao.calls(), vec![Call::Clear]);
    }

    #[tokio::test]
    async fn test_get_all_and_size() {
        let dao = RecordingDao::answering(Widget::new(Some(1), "axle"));

        let all = GetAllQuery::new(&dao).execute(&mut ()).await.unwrap();
        let size = SizeQuery::new(&dao).execute(&mut ()).await.unwrap();

        assert_eq!(all, vec![Widget::new(Some(1), "axle")]);
        assert_eq!(size, 1);
        assert_eq!(dao.calls(), vec![Call::GetAll, Call::Size]);
    }

    #[tokio::test]
    async fn test_failure_is_passed_through() {
        let dao = RecordingDao::failing();
        assert!(SizeQuery::new(&dao).execute(&mut ()).await.is_err());
        assert_eq!(dao.calls(), vec![Call::Size]);
    }
}
