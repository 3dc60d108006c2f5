use crate::adapters::delimited::DelimiterTransformer;
use crate::adapters::fixed_width::FixedWidthTransformer;
use crate::adapters::http_destination::HttpDestination;
use crate::adapters::line_reader::FileLineReader;
use crate::adapters::rules::{email_rule, phone_rule, username_rule, Rule, RuleValidator};
use crate::config::ImportConfig;
use crate::core::error_handler::{ErrorHandler, ReportContext};
use crate::core::importer::Importer;
use crate::core::writer::StreamWriter;
use crate::domain::model::{CancelFlag, FieldValue, FromFields, ImportSummary, TransformError};
use crate::domain::ports::Transformer;
use crate::domain::schema::{Column, ColumnFormat, TableRecord};
use crate::utils::error::{ImportError, Result};
use chrono::NaiveDate;
use std::path::Path;
use std::time::Duration;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The master-data user record imported from the export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub created_date: Option<NaiveDate>,
}

impl User {
    /// Column widths for fixed-width exports, in field order.
    pub const WIDTHS: [usize; 6] = [11, 10, 31, 20, 5, 10];
}

impl TableRecord for User {
    const COLUMNS: &'static [Column] = &[
        Column::with_format("id", ColumnFormat::ZeroPad(11)),
        Column::plain("username"),
        Column::plain("email"),
        Column::plain("phone"),
        Column::with_format("status", ColumnFormat::SpacePad(5)),
        Column::with_format("createddate", ColumnFormat::Date(DATE_FORMAT)),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.id.clone()),
            FieldValue::Text(self.username.clone()),
            FieldValue::Text(self.email.clone()),
            FieldValue::Text(self.phone.clone()),
            FieldValue::Text(self.status.clone()),
            self.created_date
                .map(FieldValue::Date)
                .unwrap_or(FieldValue::Null),
        ]
    }
}

impl FromFields for User {
    const FIELD_COUNT: usize = 6;

    fn from_fields(fields: &[String]) -> std::result::Result<Self, TransformError> {
        let created_date = if fields[5].is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(&fields[5], DATE_FORMAT).map_err(|e| {
                    TransformError::new(format!("createddate '{}': {}", fields[5], e))
                })?,
            )
        };
        Ok(Self {
            id: fields[0].clone(),
            username: fields[1].clone(),
            email: fields[2].clone(),
            phone: fields[3].clone(),
            status: fields[4].clone(),
            created_date,
        })
    }
}

pub fn user_validator() -> RuleValidator<User> {
    RuleValidator::new()
        .field(
            "id",
            |u: &User| FieldValue::Text(u.id.clone()),
            vec![Rule::Required, Rule::MaxLen(40)],
        )
        .field(
            "username",
            |u: &User| FieldValue::Text(u.username.clone()),
            vec![Rule::Required, username_rule(), Rule::MaxLen(100)],
        )
        .field(
            "email",
            |u: &User| FieldValue::Text(u.email.clone()),
            vec![email_rule(), Rule::MaxLen(100)],
        )
        .field(
            "phone",
            |u: &User| FieldValue::Text(u.phone.clone()),
            vec![Rule::Required, phone_rule(), Rule::MaxLen(18)],
        )
        .field(
            "createddate",
            |u: &User| {
                u.created_date
                    .map(FieldValue::Date)
                    .unwrap_or(FieldValue::Null)
            },
            vec![Rule::Required],
        )
}

type UserImporter = Importer<
    User,
    FileLineReader,
    Box<dyn Transformer<User> + Send + Sync>,
    RuleValidator<User>,
    HttpDestination,
>;

/// A fully wired import run. Construction connects to the destination and
/// opens the input, so a dead gateway or missing file fails here, before
/// any line is read.
pub struct App {
    importer: UserImporter,
}

impl App {
    pub async fn build(config: &ImportConfig, cancel: CancelFlag) -> Result<Self> {
        let destination = HttpDestination::connect(
            &config.destination.endpoint,
            &config.destination.database,
            Duration::from_millis(config.destination.poll_interval_ms),
        )
        .await?;

        let reader = FileLineReader::open(&config.source.path).await?;

        let transformer: Box<dyn Transformer<User> + Send + Sync> =
            match config.source.framing.as_str() {
                "fixed" => Box::new(FixedWidthTransformer::new(User::WIDTHS.to_vec())),
                _ => {
                    let delimiter = *config.source.delimiter.as_bytes().first().ok_or_else(|| {
                        ImportError::MissingConfigError {
                            field: "source.delimiter".to_string(),
                        }
                    })?;
                    Box::new(DelimiterTransformer::new(delimiter))
                }
            };

        let writer =
            StreamWriter::new(destination, config.destination.table.as_str(), config.batch_size);

        let file_name = Path::new(&config.source.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&config.source.path)
            .to_string();
        let mut context = ReportContext::new(file_name);
        context.tags = config.tags.clone();

        let importer = Importer::new(
            reader,
            transformer,
            user_validator(),
            writer?,
            ErrorHandler::new(context),
            cancel,
        );
        Ok(Self { importer })
    }

    pub async fn import(self) -> (ImportSummary, Option<ImportError>) {
        self.importer.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Validator;

    fn csv_user() -> Vec<String> {
        vec![
            "383".to_string(),
            "anna.k".to_string(),
            "anna@example.com".to_string(),
            "+47 555 0101".to_string(),
            "1".to_string(),
            "2023-11-02".to_string(),
        ]
    }

    #[test]
    fn decodes_a_full_field_list() {
        let user = User::from_fields(&csv_user()).unwrap();
        assert_eq!(user.id, "383");
        assert_eq!(user.created_date, NaiveDate::from_ymd_opt(2023, 11, 2));
        assert!(user_validator().validate(&user).is_empty());
    }

    #[test]
    fn bad_date_is_a_transform_error() {
        let mut fields = csv_user();
        fields[5] = "02/11/2023".to_string();
        assert!(User::from_fields(&fields).is_err());
    }

    #[test]
    fn missing_phone_is_a_violation_not_an_error() {
        let mut fields = csv_user();
        fields[3] = String::new();
        let user = User::from_fields(&fields).unwrap();
        let violations = user_validator().validate(&user);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "phone");
        assert_eq!(violations[0].code, "required");
    }
}
