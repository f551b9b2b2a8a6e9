use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sqlx::error::DatabaseError;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityName, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, RuntimeErr, SqlxError,
};

use quill_core::domain::Record;
use quill_core::error::RepoError;
use quill_core::pagination::{Page, PageRequest};
use quill_core::ports::BaseRepository;

/// SQLSTATE `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE `foreign_key_violation`, raised for RESTRICT deletes too.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn driver_error(err: &DbErr) -> Option<&dyn DatabaseError> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(SqlxError::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(SqlxError::Database(e))) => Some(&**e),
        _ => None,
    }
}

/// Translate a SeaORM error into the repository taxonomy.
///
/// Constraint rejections are recognised from the driver's SQLSTATE; everything
/// else keeps the driver's message.
pub fn map_db_err(err: DbErr) -> RepoError {
    if let Some(db_err) = driver_error(&err) {
        let code = db_err.code();
        if matches!(code.as_deref(), Some(UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION)) {
            return RepoError::Constraint(db_err.message().to_string());
        }
    }

    match err {
        DbErr::ConnectionAcquire(e) => RepoError::Unavailable(e.to_string()),
        DbErr::Conn(e) => RepoError::Unavailable(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: Record + From<E::Model> + Into<E::ActiveModel> + Clone + Send + Sync + 'static,
    T::Fields: Into<E::ActiveModel> + 'static,
{
    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let rows = E::find().all(&self.db).await.map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<T>, RepoError> {
        let paginator = E::find().paginate(&self.db, request.limit());

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(request.page() - 1)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            table = E::default().table_name(),
            page = request.page(),
            rows = rows.len(),
            total,
            "Fetched page"
        );

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, fields: T::Fields) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = fields.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.clone().into();
        let result = active_model.delete(&self.db).await.map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(entity)
    }
}
