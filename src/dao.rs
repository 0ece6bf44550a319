use std::fmt;
use std::marker::PhantomData;

use crate::config::StoreConfig;
use crate::entity::Entity;
use crate::error::SqlDaoError;
use crate::params::Param;
use crate::session::Session;
use crate::types::StatementKind;

/// CRUD access for one entity type.
///
/// A thin typed view over a [`Session`]. The session (and any transaction open on
/// it) can be handed to a `Dao` of another entity type with [`Dao::retype`], so
/// writes to several tables can share one transaction.
///
/// ```rust,no_run
/// use sql_dao::prelude::*;
///
/// entity! {
///     #[derive(Debug, Default, Clone)]
///     pub struct User {
///         pub UserId: Option<i64>,
///         pub UserName: Option<String>,
///     }
/// }
///
/// # fn main() -> Result<(), SqlDaoError> {
/// let config = StoreConfig::sqlite_builder("app.db").build();
/// let mut users: Dao<User> = Dao::new(config);
/// let added = users.add(&User { UserName: Some("alice".into()), ..User::default() })?;
/// assert!(added);
/// let alice = users.query(&User { UserName: Some("alice".into()), ..User::default() })?;
/// # let _ = alice;
/// # Ok(())
/// # }
/// ```
pub struct Dao<E: Entity> {
    session: Session,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Dao<E> {
    #[must_use]
    pub fn new(config: impl Into<StoreConfig>) -> Self {
        Self::from_session(Session::new(config))
    }

    /// Adopt an existing session, including its active transaction if any.
    #[must_use]
    pub fn from_session(session: Session) -> Self {
        Self {
            session,
            _entity: PhantomData,
        }
    }

    #[must_use]
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Hand this DAO's session to a DAO for another entity type.
    #[must_use]
    pub fn retype<T: Entity>(self) -> Dao<T> {
        Dao::from_session(self.session)
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.session.in_transaction()
    }

    /// See [`Session::add`].
    ///
    /// # Errors
    /// Same as [`Session::add`].
    pub fn add(&mut self, entity: &E) -> Result<bool, SqlDaoError> {
        self.session.add(entity)
    }

    /// See [`Session::delete`].
    ///
    /// # Errors
    /// Same as [`Session::delete`].
    pub fn delete(&mut self, filter: &E) -> Result<bool, SqlDaoError> {
        self.session.delete(filter)
    }

    /// See [`Session::update`].
    ///
    /// # Errors
    /// Same as [`Session::update`].
    pub fn update(&mut self, entity: &E, key: &str) -> Result<bool, SqlDaoError> {
        self.session.update(entity, key)
    }

    /// See [`Session::query`].
    ///
    /// # Errors
    /// Same as [`Session::query`].
    pub fn query(&mut self, filter: &E) -> Result<Vec<E>, SqlDaoError> {
        self.session.query(filter)
    }

    /// Run arbitrary SQL and map the rows onto `E`.
    ///
    /// # Errors
    /// Same as [`Session::execute_reader`].
    pub fn execute_reader(
        &mut self,
        sql: &str,
        params: &[Param],
        kind: StatementKind,
    ) -> Result<Vec<E>, SqlDaoError> {
        self.session.execute_reader(sql, params, kind)
    }

    /// # Errors
    /// Same as [`Session::begin_transaction`].
    pub fn begin_transaction(&mut self) -> Result<(), SqlDaoError> {
        self.session.begin_transaction()
    }

    /// # Errors
    /// Same as [`Session::commit`].
    pub fn commit(&mut self) -> Result<(), SqlDaoError> {
        self.session.commit()
    }

    /// # Errors
    /// Same as [`Session::rollback`].
    pub fn rollback(&mut self) -> Result<(), SqlDaoError> {
        self.session.rollback()
    }
}

impl<E: Entity> fmt::Debug for Dao<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dao")
            .field("entity", &E::TYPE_NAME)
            .field("session", &self.session)
            .finish()
    }
}
