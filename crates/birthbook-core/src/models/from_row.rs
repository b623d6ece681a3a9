#[cfg(any(feature = "postgres", feature = "sqlite"))]
use sqlx_core::from_row::FromRow;
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use sqlx_core::row::Row;
#[cfg(feature = "postgres")]
use sqlx_postgres::PgRow;
#[cfg(feature = "sqlite")]
use sqlx_sqlite::SqliteRow;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
use super::*;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
fn parse_enum<T: TryFrom<i32, Error = EnumParseError>>(value: i16) -> Result<T, sqlx_core::Error> {
    T::try_from(i32::from(value)).map_err(|err| sqlx_core::Error::Decode(Box::new(err)))
}

#[allow(unused_macros)]
macro_rules! impl_from_row {
    ($ty:ty, $row:ident => $body:block) => {
        #[cfg(feature = "sqlite")]
        impl FromRow<'_, SqliteRow> for $ty {
            fn from_row($row: &SqliteRow) -> Result<Self, sqlx_core::Error> {
                $body
            }
        }

        #[cfg(feature = "postgres")]
        impl FromRow<'_, PgRow> for $ty {
            fn from_row($row: &PgRow) -> Result<Self, sqlx_core::Error> {
                $body
            }
        }
    };
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl_from_row!(User, row => {
    let status: i16 = row.try_get("status")?;
    Ok(Self {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        birthday: row.try_get("birthday")?,
        status: parse_enum(status)?,
    })
});
