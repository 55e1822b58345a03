//! Generator tests across modes, dialects and validation paths

use chrono::{DateTime, TimeZone, Utc};
use ingest_sql_sdk::dialect::{CaseConversion, Dialect};
use ingest_sql_sdk::generator::{GeneratorError, OPEN_BATCH_ID, RelationalGenerator};
use ingest_sql_sdk::models::{
    Auditing, DataSplitRange, Dataset, Deduplication, Field, IngestMode, StatisticName,
    TransactionMilestoning, Versioning,
};

fn batch_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

fn generator(dialect: Dialect) -> RelationalGenerator {
    RelationalGenerator::new(dialect).with_batch_timestamp(batch_timestamp())
}

fn flat_dataset(name: &str) -> Dataset {
    Dataset::new(
        name,
        vec![
            Field::new("id", "INT64"),
            Field::new("name", "STRING"),
            Field::new("amount", "FLOAT64"),
            Field::new("biz_date", "DATE"),
            Field::new("digest", "STRING"),
        ],
    )
    .in_database("mydb")
}

fn keyed_staging() -> Dataset {
    Dataset::new(
        "staging",
        vec![
            Field::new("id", "INT64").as_primary_key(),
            Field::new("name", "STRING").as_primary_key(),
            Field::new("amount", "FLOAT64"),
            Field::new("digest", "STRING"),
        ],
    )
    .in_database("mydb")
}

fn milestoned_main() -> Dataset {
    let mut main = keyed_staging();
    main.name = "main".to_string();
    main.schema.push(Field::new("batch_id_in", "INT64").not_null());
    main.schema.push(Field::new("batch_id_out", "INT64"));
    main
}

fn append_only_plain() -> IngestMode {
    IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
        filter_existing_records: false,
        digest_field: None,
    }
}

fn unitemporal_mode() -> IngestMode {
    IngestMode::UnitemporalDelta {
        transaction_milestoning: TransactionMilestoning::BatchId {
            in_field: "batch_id_in".to_string(),
            out_field: "batch_id_out".to_string(),
        },
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
        digest_field: "digest".to_string(),
    }
}

fn expect_invalid(result: Result<Vec<ingest_sql_sdk::GeneratorResult>, GeneratorError>, needle: &str) {
    match result {
        Err(GeneratorError::InvalidSpecification(message)) => {
            assert!(
                message.contains(needle),
                "expected '{needle}' in '{message}'"
            );
        }
        other => panic!("expected InvalidSpecification, got {other:?}"),
    }
}

#[test]
fn test_nontemporal_snapshot() {
    let main = flat_dataset("main");
    let staging = flat_dataset("staging");
    let mode = IngestMode::NontemporalSnapshot {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
    };

    let results = generator(Dialect::BigQuery)
        .generate_operations(&main, &staging, &mode)
        .unwrap();
    let operations = &results[0];

    assert_eq!(
        operations.ingest_sql(),
        [
            "DELETE FROM `mydb`.`main` as sink WHERE 1 = 1",
            "INSERT INTO `mydb`.`main` (`id`, `name`, `amount`, `biz_date`, `digest`) (SELECT * FROM `mydb`.`staging` as stage)",
        ]
    );
    // Row counts for the snapshot are taken before the ingest runs, so
    // rows-deleted is the size of the table being replaced.
    assert_eq!(
        operations.statistic(StatisticName::RowsDeleted),
        Some("SELECT COUNT(*) as `rowsDeleted` FROM `mydb`.`main` as sink")
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsInserted),
        Some("SELECT COUNT(*) as `rowsInserted` FROM `mydb`.`main` as sink")
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsUpdated),
        Some("SELECT 0 as `rowsUpdated`")
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsTerminated),
        Some("SELECT 0 as `rowsTerminated`")
    );
    assert_eq!(
        operations.statistic(StatisticName::IncomingRecordCount),
        Some("SELECT COUNT(*) as `incomingRecordCount` FROM `mydb`.`staging` as stage")
    );
}

#[test]
fn test_nontemporal_snapshot_with_audit_column() {
    let mut main = flat_dataset("main");
    main.schema
        .push(Field::new("batch_update_time", "DATETIME").not_null());
    let staging = flat_dataset("staging");
    let mode = IngestMode::NontemporalSnapshot {
        auditing: Auditing::DateTime {
            field: "batch_update_time".to_string(),
        },
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
    };

    let results = generator(Dialect::BigQuery)
        .generate_operations(&main, &staging, &mode)
        .unwrap();

    assert_eq!(
        results[0].ingest_sql()[1],
        "INSERT INTO `mydb`.`main` (`id`, `name`, `amount`, `biz_date`, `digest`, `batch_update_time`) (SELECT stage.`id`,stage.`name`,stage.`amount`,stage.`biz_date`,stage.`digest`,PARSE_DATETIME('%Y-%m-%d %H:%M:%S','2000-01-01 00:00:00.000000') FROM `mydb`.`staging` as stage)"
    );
}

#[test]
fn test_unitemporal_delta() {
    let main = milestoned_main();
    let staging = keyed_staging();

    let results = generator(Dialect::BigQuery)
        .generate_operations(&main, &staging, &unitemporal_mode())
        .unwrap();
    let operations = &results[0];

    assert_eq!(
        operations.pre_actions_sql()[0],
        "CREATE TABLE IF NOT EXISTS `mydb`.`main`(`id` INT64 NOT NULL,`name` STRING NOT NULL,`amount` FLOAT64,`digest` STRING,`batch_id_in` INT64 NOT NULL,`batch_id_out` INT64,PRIMARY KEY (`id`, `name`) NOT ENFORCED)"
    );
    assert_eq!(
        operations.ingest_sql(),
        [
            "UPDATE `mydb`.`main` as sink SET sink.`batch_id_out` = 0 WHERE (sink.`batch_id_out` = 999999999) AND (EXISTS (SELECT * FROM `mydb`.`staging` as stage WHERE ((sink.`id` = stage.`id`) AND (sink.`name` = stage.`name`)) AND (sink.`digest` <> stage.`digest`)))",
            "INSERT INTO `mydb`.`main` (`id`, `name`, `amount`, `digest`, `batch_id_in`, `batch_id_out`) (SELECT stage.`id`,stage.`name`,stage.`amount`,stage.`digest`,1,999999999 FROM `mydb`.`staging` as stage WHERE NOT (stage.`digest` IN (SELECT sink.`digest` FROM `mydb`.`main` as sink WHERE sink.`batch_id_out` = 999999999)))",
        ]
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsInserted),
        Some("SELECT COUNT(*) as `rowsInserted` FROM `mydb`.`main` as sink WHERE sink.`batch_id_in` = 1")
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsUpdated),
        Some("SELECT COUNT(*) as `rowsUpdated` FROM `mydb`.`main` as sink WHERE sink.`batch_id_out` = 0")
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsDeleted),
        Some("SELECT 0 as `rowsDeleted`")
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsTerminated),
        Some("SELECT 0 as `rowsTerminated`")
    );
}

#[test]
fn test_unitemporal_delta_with_explicit_batch_id() {
    let main = milestoned_main();
    let staging = keyed_staging();

    let results = generator(Dialect::BigQuery)
        .with_batch_id(5)
        .generate_operations(&main, &staging, &unitemporal_mode())
        .unwrap();
    let operations = &results[0];

    assert!(operations.ingest_sql()[0].contains("SET sink.`batch_id_out` = 4 WHERE"));
    assert!(operations.ingest_sql()[1].contains(",5,999999999 FROM"));
    assert_eq!(
        operations.statistic(StatisticName::RowsInserted),
        Some("SELECT COUNT(*) as `rowsInserted` FROM `mydb`.`main` as sink WHERE sink.`batch_id_in` = 5")
    );
    assert_eq!(
        operations.statistic(StatisticName::RowsUpdated),
        Some("SELECT COUNT(*) as `rowsUpdated` FROM `mydb`.`main` as sink WHERE sink.`batch_id_out` = 4")
    );
}

#[test]
fn test_bitemporal_delta_matches_validity_from() {
    let staging = Dataset::new(
        "staging",
        vec![
            Field::new("id", "INT64").as_primary_key(),
            Field::new("validity_from", "DATETIME").not_null(),
            Field::new("validity_through", "DATETIME"),
            Field::new("amount", "FLOAT64"),
            Field::new("digest", "STRING"),
        ],
    )
    .in_database("mydb");
    let mut main = staging.clone();
    main.name = "main".to_string();
    main.schema.push(Field::new("batch_id_in", "INT64").not_null());
    main.schema.push(Field::new("batch_id_out", "INT64"));
    let mode = IngestMode::BitemporalDelta {
        transaction_milestoning: TransactionMilestoning::BatchId {
            in_field: "batch_id_in".to_string(),
            out_field: "batch_id_out".to_string(),
        },
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
        digest_field: "digest".to_string(),
        validity_from_field: "validity_from".to_string(),
        validity_through_field: "validity_through".to_string(),
    };

    let results = generator(Dialect::BigQuery)
        .generate_operations(&main, &staging, &mode)
        .unwrap();
    let operations = &results[0];

    // Distinct validity periods of one key are milestoned independently.
    assert_eq!(
        operations.ingest_sql()[0],
        "UPDATE `mydb`.`main` as sink SET sink.`batch_id_out` = 0 WHERE (sink.`batch_id_out` = 999999999) AND (EXISTS (SELECT * FROM `mydb`.`staging` as stage WHERE ((sink.`id` = stage.`id`) AND (sink.`validity_from` = stage.`validity_from`)) AND (sink.`digest` <> stage.`digest`)))"
    );
    assert_eq!(
        operations.ingest_sql()[1],
        "INSERT INTO `mydb`.`main` (`id`, `validity_from`, `validity_through`, `amount`, `digest`, `batch_id_in`, `batch_id_out`) (SELECT stage.`id`,stage.`validity_from`,stage.`validity_through`,stage.`amount`,stage.`digest`,1,999999999 FROM `mydb`.`staging` as stage WHERE NOT (stage.`digest` IN (SELECT sink.`digest` FROM `mydb`.`main` as sink WHERE sink.`batch_id_out` = 999999999)))"
    );
}

#[test]
fn test_snowflake_rendition() {
    let main = Dataset::new(
        "main",
        vec![
            Field::new("id", "NUMBER"),
            Field::new("name", "VARCHAR"),
            Field::new("load_time", "TIMESTAMP_NTZ").not_null(),
        ],
    )
    .in_database("mydb");
    let staging = Dataset::new(
        "staging",
        vec![Field::new("id", "NUMBER"), Field::new("name", "VARCHAR")],
    )
    .in_database("mydb");
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::DateTime {
            field: "load_time".to_string(),
        },
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
        filter_existing_records: false,
        digest_field: None,
    };

    let results = generator(Dialect::Snowflake)
        .generate_operations(&main, &staging, &mode)
        .unwrap();
    let operations = &results[0];

    assert_eq!(
        operations.pre_actions_sql()[0],
        "CREATE TABLE IF NOT EXISTS \"mydb\".\"main\"(\"id\" NUMBER,\"name\" VARCHAR,\"load_time\" TIMESTAMP_NTZ NOT NULL)"
    );
    assert_eq!(
        operations.ingest_sql()[0],
        "INSERT INTO \"mydb\".\"main\" (\"id\", \"name\", \"load_time\") (SELECT stage.\"id\",stage.\"name\",TO_TIMESTAMP('2000-01-01 00:00:00.000000') FROM \"mydb\".\"staging\" as stage)"
    );
    assert_eq!(
        operations.post_actions_sql(),
        ["DELETE FROM \"mydb\".\"staging\" as stage WHERE 1 = 1"]
    );
}

#[test]
fn test_generation_is_deterministic() {
    let main = milestoned_main();
    let staging = keyed_staging();
    let generator = generator(Dialect::BigQuery).with_batch_id(3);

    let first = generator
        .generate_operations(&main, &staging, &unitemporal_mode())
        .unwrap();
    let second = generator
        .generate_operations(&main, &staging, &unitemporal_mode())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_generation_does_not_mutate_inputs() {
    let main = milestoned_main();
    let staging = keyed_staging();
    let main_before = main.clone();
    let staging_before = staging.clone();

    generator(Dialect::BigQuery)
        .generate_operations(&main, &staging, &unitemporal_mode())
        .unwrap();
    assert_eq!(main, main_before);
    assert_eq!(staging, staging_before);
}

#[test]
fn test_one_result_per_split_range_sharing_pre_actions() {
    let mut staging = keyed_staging();
    staging.schema.push(Field::new("biz_date", "DATE"));
    let mut main = staging.clone();
    main.name = "main".to_string();
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::FilterDuplicates,
        versioning: Versioning::AllVersions {
            field: "biz_date".to_string(),
        },
        filter_existing_records: false,
        digest_field: Some("digest".to_string()),
    };
    let ranges = vec![
        DataSplitRange::new(1, 2),
        DataSplitRange::new(3, 4),
        DataSplitRange::new(5, 5),
    ];

    let results = generator(Dialect::BigQuery)
        .with_data_split_ranges(ranges)
        .generate_operations(&main, &staging, &mode)
        .unwrap();

    assert_eq!(results.len(), 3);
    for result in &results[1..] {
        assert_eq!(result.pre_actions_sql(), results[0].pre_actions_sql());
        assert_eq!(
            result.deduplication_and_versioning_sql(),
            results[0].deduplication_and_versioning_sql()
        );
    }
    assert!(results[0].ingest_sql()[0].contains("(stage.`data_split` >= '1') AND (stage.`data_split` <= '2')"));
    assert!(results[2].ingest_sql()[0].contains("(stage.`data_split` >= '5') AND (stage.`data_split` <= '5')"));
}

#[test]
fn test_all_versions_without_ranges_keeps_placeholders() {
    let mut staging = keyed_staging();
    staging.schema.push(Field::new("biz_date", "DATE"));
    let mut main = staging.clone();
    main.name = "main".to_string();
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::FilterDuplicates,
        versioning: Versioning::AllVersions {
            field: "biz_date".to_string(),
        },
        filter_existing_records: false,
        digest_field: Some("digest".to_string()),
    };

    let results = generator(Dialect::BigQuery)
        .generate_operations(&main, &staging, &mode)
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].ingest_sql()[0].contains("'{DATA_SPLIT_LOWER_BOUND_PLACEHOLDER}'"));
    assert!(results[0].ingest_sql()[0].contains("'{DATA_SPLIT_UPPER_BOUND_PLACEHOLDER}'"));
}

#[test]
fn test_rejects_staging_field_missing_on_main() {
    let main = flat_dataset("main");
    let mut staging = flat_dataset("staging");
    staging.schema.push(Field::new("extra", "STRING"));

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &append_only_plain()),
        "extra",
    );
}

#[test]
fn test_rejects_primary_key_mismatch() {
    let main = flat_dataset("main");
    let mut staging = flat_dataset("staging");
    staging.schema[0] = Field::new("id", "INT64").as_primary_key();

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &append_only_plain()),
        "primary key",
    );
}

#[test]
fn test_rejects_filter_existing_without_digest() {
    let mut main = flat_dataset("main");
    main.schema
        .push(Field::new("batch_update_time", "DATETIME").not_null());
    let staging = flat_dataset("staging");
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::DateTime {
            field: "batch_update_time".to_string(),
        },
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
        filter_existing_records: true,
        digest_field: None,
    };

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &mode),
        "digest",
    );
}

#[test]
fn test_rejects_filter_existing_without_auditing() {
    let main = flat_dataset("main");
    let staging = flat_dataset("staging");
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
        filter_existing_records: true,
        digest_field: Some("digest".to_string()),
    };

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &mode),
        "auditing",
    );
}

#[test]
fn test_rejects_unknown_version_field() {
    let mut staging = keyed_staging();
    staging.schema.push(Field::new("biz_date", "DATE"));
    let mut main = staging.clone();
    main.name = "main".to_string();
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::MaxVersion {
            field: "version".to_string(),
        },
        filter_existing_records: false,
        digest_field: Some("digest".to_string()),
    };

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &mode),
        "version",
    );
}

#[test]
fn test_rejects_versioning_without_primary_keys() {
    let main = flat_dataset("main");
    let staging = flat_dataset("staging");
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::MaxVersion {
            field: "biz_date".to_string(),
        },
        filter_existing_records: false,
        digest_field: Some("digest".to_string()),
    };

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &mode),
        "primary keys",
    );
}

#[test]
fn test_rejects_audit_field_declared_on_staging() {
    let mut main = flat_dataset("main");
    main.schema
        .push(Field::new("batch_update_time", "DATETIME").not_null());
    let mut staging = flat_dataset("staging");
    staging
        .schema
        .push(Field::new("batch_update_time", "DATETIME"));
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::DateTime {
            field: "batch_update_time".to_string(),
        },
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::NoVersioning,
        filter_existing_records: false,
        digest_field: None,
    };

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &mode),
        "audit field",
    );
}

#[test]
fn test_rejects_split_ranges_without_all_versions() {
    let main = flat_dataset("main");
    let staging = flat_dataset("staging");

    expect_invalid(
        generator(Dialect::BigQuery)
            .with_data_split_ranges(vec![DataSplitRange::new(1, 2)])
            .generate_operations(&main, &staging, &append_only_plain()),
        "all-versions",
    );
}

#[test]
fn test_rejects_inverted_split_range() {
    let mut staging = keyed_staging();
    staging.schema.push(Field::new("biz_date", "DATE"));
    let mut main = staging.clone();
    main.name = "main".to_string();
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::AllVersions {
            field: "biz_date".to_string(),
        },
        filter_existing_records: false,
        digest_field: Some("digest".to_string()),
    };

    expect_invalid(
        generator(Dialect::BigQuery)
            .with_data_split_ranges(vec![DataSplitRange::new(3, 1)])
            .generate_operations(&main, &staging, &mode),
        "inverted",
    );
}

#[test]
fn test_rejects_snapshot_with_all_versions() {
    let mut staging = keyed_staging();
    staging.schema.push(Field::new("biz_date", "DATE"));
    let mut main = staging.clone();
    main.name = "main".to_string();
    let mode = IngestMode::NontemporalSnapshot {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::AllVersions {
            field: "biz_date".to_string(),
        },
    };

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &mode),
        "all-versions",
    );
}

#[test]
fn test_rejects_zero_batch_id() {
    let main = milestoned_main();
    let staging = keyed_staging();

    expect_invalid(
        generator(Dialect::BigQuery)
            .with_batch_id(0)
            .generate_operations(&main, &staging, &unitemporal_mode()),
        "batch id",
    );
}

#[test]
fn test_rejects_milestoning_field_declared_on_staging() {
    let main = milestoned_main();
    let mut staging = keyed_staging();
    staging.schema.push(Field::new("batch_id_in", "INT64"));

    expect_invalid(
        generator(Dialect::BigQuery).generate_operations(&main, &staging, &unitemporal_mode()),
        "milestoning field",
    );
}

#[test]
fn test_ansi_dialect_rejects_versioning() {
    let mut staging = keyed_staging();
    staging.schema.push(Field::new("biz_date", "DATE"));
    let mut main = staging.clone();
    main.name = "main".to_string();
    let mode = IngestMode::AppendOnly {
        auditing: Auditing::None,
        deduplication: Deduplication::AllowDuplicates,
        versioning: Versioning::MaxVersion {
            field: "biz_date".to_string(),
        },
        filter_existing_records: false,
        digest_field: Some("digest".to_string()),
    };

    match generator(Dialect::Ansi).generate_operations(&main, &staging, &mode) {
        Err(GeneratorError::UnsupportedByDialect(message)) => {
            assert!(message.contains("window functions"));
        }
        other => panic!("expected UnsupportedByDialect, got {other:?}"),
    }
}

#[test]
fn test_open_batch_id_sentinel() {
    assert_eq!(OPEN_BATCH_ID, 999_999_999);
}

mod parse_validation {
    //! Every generated statement must be parseable SQL for its dialect.

    use super::*;
    use sqlparser::dialect::BigQueryDialect;
    use sqlparser::parser::Parser;

    fn assert_parses(sql: &str) {
        if let Err(e) = Parser::parse_sql(&BigQueryDialect {}, sql) {
            panic!("generated SQL failed to parse: {e}\n{sql}");
        }
    }

    #[test]
    fn test_generated_statements_parse() {
        let mut staging = keyed_staging();
        staging.schema.push(Field::new("biz_date", "DATE"));
        let mut main = staging.clone();
        main.name = "main".to_string();
        main.schema
            .push(Field::new("batch_update_time", "DATETIME").not_null());
        let mode = IngestMode::AppendOnly {
            auditing: Auditing::DateTime {
                field: "batch_update_time".to_string(),
            },
            deduplication: Deduplication::FailOnDuplicates,
            versioning: Versioning::AllVersions {
                field: "biz_date".to_string(),
            },
            filter_existing_records: true,
            digest_field: Some("digest".to_string()),
        };

        let results = generator(Dialect::BigQuery)
            .with_data_split_ranges(vec![DataSplitRange::new(1, 1)])
            .generate_operations(&main, &staging, &mode)
            .unwrap();
        let operations = &results[0];

        for sql in operations.deduplication_and_versioning_sql() {
            assert_parses(sql);
        }
        for sql in operations.ingest_sql() {
            assert_parses(sql);
        }
        for sql in operations.post_actions_sql() {
            assert_parses(sql);
        }
        if let Some(sql) = operations.deduplication_error_check_sql() {
            assert_parses(sql);
        }
        for sql in operations.post_ingest_statistics_sql().values().flatten() {
            assert_parses(sql);
        }
    }

    #[test]
    fn test_milestoning_statements_parse() {
        let results = generator(Dialect::BigQuery)
            .generate_operations(&milestoned_main(), &keyed_staging(), &unitemporal_mode())
            .unwrap();
        for sql in results[0].ingest_sql() {
            assert_parses(sql);
        }
    }
}
