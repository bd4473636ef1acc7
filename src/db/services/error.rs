use sea_orm::{DbErr, RuntimeErr};

use crate::phone::PhoneNumberError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },
    #[error("A {entity} with the name '{name}' already exists.")]
    DuplicateName { entity: &'static str, name: String },
    #[error("Major action chain of event {0} loops back on itself")]
    CyclicReference(i32),
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(#[from] PhoneNumberError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        ServiceError::NotFound { entity, id }
    }
}

/// Maps a unique-constraint violation reported by the database to
/// `DuplicateName`; everything else stays a `DbErr`.
pub(crate) fn map_unique_violation(db_err: DbErr, entity: &'static str, name: &str) -> ServiceError {
    match &db_err {
        DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(database_error)))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(database_error)))
            if database_error.is_unique_violation() =>
        {
            ServiceError::DuplicateName {
                entity,
                name: name.to_string(),
            }
        }
        _ => ServiceError::DbErr(db_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::group;
    use crate::db::schema;
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};

    #[tokio::test]
    async fn test_unique_violation_maps_to_duplicate_name() {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        schema::create_tables(&db).await.unwrap();

        let organizers = group::ActiveModel {
            name: Set("Organizers".to_string()),
            ..Default::default()
        };
        organizers.clone().insert(&db).await.unwrap();
        let db_err = organizers.insert(&db).await.unwrap_err();

        let mapped = map_unique_violation(db_err, "group", "Organizers");
        assert!(matches!(
            mapped,
            ServiceError::DuplicateName { entity: "group", ref name } if name == "Organizers"
        ));
    }

    #[test]
    fn test_other_errors_stay_db_errors() {
        let mapped = map_unique_violation(DbErr::RecordNotFound("groups".to_string()), "group", "x");
        assert!(matches!(mapped, ServiceError::DbErr(DbErr::RecordNotFound(_))));
    }
}
