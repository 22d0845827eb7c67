//! End-to-end reconciliation of a realistic client inventory pair.

use vigil_inventory::{
    summarize, AssetComparator, AssetKind, AssetOrigin, AssetRecord, DiffField, RowStatus,
};

fn questionnaire() -> Vec<AssetRecord> {
    vec![
        AssetRecord::new(AssetKind::Database, "Trading-DB", AssetOrigin::Questionnaire)
            .with_ip("10.0.0.1")
            .with_environment("production")
            .with_owner("DB Team"),
        AssetRecord::new(AssetKind::DomainController, "DC-Primary", AssetOrigin::Questionnaire)
            .with_fqdn("dc01.corp.example.com")
            .with_environment("prod"),
        AssetRecord::new(AssetKind::WebServer, "Customer-Portal-Srv", AssetOrigin::Questionnaire)
            .with_environment("prod")
            .with_owner("Web Team"),
        AssetRecord::new(AssetKind::FileServer, "Legacy-Share", AssetOrigin::Questionnaire),
    ]
}

fn cmdb() -> Vec<AssetRecord> {
    vec![
        AssetRecord::new(AssetKind::Database, "Trading-System", AssetOrigin::Cmdb)
            .with_ip("10.0.0.1")
            .with_environment("prod")
            .with_owner("DB Team"),
        AssetRecord::new(AssetKind::DomainController, "dc-01", AssetOrigin::Cmdb)
            .with_fqdn("DC01.CORP.EXAMPLE.COM")
            .with_environment("production"),
        AssetRecord::new(AssetKind::WebServer, "customer portal", AssetOrigin::Cmdb)
            .with_environment("staging")
            .with_owner("Web Team"),
        AssetRecord::new(AssetKind::Firewall, "edge-fw-01", AssetOrigin::Cmdb)
            .with_ip("10.0.0.254"),
    ]
}

#[test]
fn reconciles_a_mixed_inventory_pair() {
    let rows = AssetComparator::new().reconcile(&questionnaire(), &cmdb());

    // Every record lands in exactly one row: 4 + 4 - 3 matched pairs.
    assert_eq!(rows.len(), 5);

    // Trading-DB matches by IP; the IP-confirmed name disagreement is the
    // only diff (environment normalizes equal, owner equal).
    assert_eq!(rows[0].status, RowStatus::Conflict);
    let diffs = rows[0].diffs.as_ref().unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].field, DiffField::Name);

    // The domain controller matches by case-insensitive FQDN; without an
    // IP confirmation the differing names are not a conflict, and the
    // environment tags normalize equal.
    assert_eq!(rows[1].status, RowStatus::Match);

    // The portal matches by normalized name ("customer portal" both
    // sides) and conflicts on environment.
    assert_eq!(rows[2].status, RowStatus::Conflict);
    let diffs = rows[2].diffs.as_ref().unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].field, DiffField::Environment);
    assert_eq!(diffs[0].questionnaire.as_deref(), Some("prod"));
    assert_eq!(diffs[0].cmdb.as_deref(), Some("staging"));

    // The legacy share was never registered in the CMDB.
    assert_eq!(rows[3].status, RowStatus::MissingInCmdb);

    // The firewall was never self-reported.
    assert_eq!(rows[4].status, RowStatus::MissingInQuestionnaire);
    assert_eq!(rows[4].kind, AssetKind::Firewall);
}

#[test]
fn summary_matches_the_row_set() {
    let rows = AssetComparator::new().reconcile(&questionnaire(), &cmdb());
    let summary = summarize(&rows);

    assert_eq!(summary.total, 5);
    assert_eq!(summary.matched_pairs, 3);
    assert_eq!(summary.status_count(RowStatus::Match), 1);
    assert_eq!(summary.status_count(RowStatus::Conflict), 2);
    assert_eq!(summary.status_count(RowStatus::MissingInCmdb), 1);
    assert_eq!(summary.status_count(RowStatus::MissingInQuestionnaire), 1);
    assert_eq!(summary.conflict_field_count(DiffField::Name), 1);
    assert_eq!(summary.conflict_field_count(DiffField::Environment), 1);
    assert_eq!(summary.conflict_field_count(DiffField::Owner), 0);
}

#[test]
fn rerunning_the_comparison_is_stable() {
    let comparator = AssetComparator::new();
    let first = comparator.reconcile(&questionnaire(), &cmdb());
    let second = comparator.reconcile(&questionnaire(), &cmdb());
    assert_eq!(first, second);
}
