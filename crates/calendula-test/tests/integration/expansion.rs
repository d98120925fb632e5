use calendula_test::component::expand::{
    ExpansionDiagnostic, ExpansionOptions, expand, expand_with_options,
};
use calendula_test::component::model::{EventInstance, Frequency, RecurrenceRule};
use calendula_test::fixtures::{date, days, local, recurring};

mod cases {
    include!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../calendula-expand/tests/expansion_cases_data/mod.rs"
    ));
}

fn starts(instances: &[EventInstance]) -> Vec<String> {
    instances
        .iter()
        .map(|i| i.start().format("%Y-%m-%dT%H:%M").to_string())
        .collect()
}

/// ## Summary
/// Integration-level validation of the shared expansion cases.
#[test_log::test]
fn expansion_cases_integration() {
    for case in cases::expansion_cases() {
        cases::assert_case(&case, expand);
    }
}

#[test_log::test]
fn scenario_a_daily_week() -> anyhow::Result<()> {
    let master = recurring("standup", "2024-01-01T09:00", "2024-01-01T10:00", Frequency::Daily, 1)?;
    let instances = expand(&master, &days("2024-01-01", "2024-01-05")?);

    assert_eq!(
        starts(&instances),
        [
            "2024-01-01T09:00",
            "2024-01-02T09:00",
            "2024-01-03T09:00",
            "2024-01-04T09:00",
            "2024-01-05T09:00",
        ]
    );
    assert!(!instances[0].is_recurrence_instance);
    for instance in &instances[1..] {
        assert!(instance.is_recurrence_instance);
        assert_eq!(instance.original_event_id.as_deref(), Some("standup"));
        assert_eq!(instance.end() - instance.start(), chrono::TimeDelta::hours(1));
    }
    Ok(())
}

#[test_log::test]
fn scenario_b_exception_date() -> anyhow::Result<()> {
    let master = recurring("standup", "2024-01-01T09:00", "2024-01-01T10:00", Frequency::Daily, 1)?
        .with_exception_date(date("2024-01-03")?);
    let instances = expand(&master, &days("2024-01-01", "2024-01-05")?);

    assert_eq!(
        starts(&instances),
        [
            "2024-01-01T09:00",
            "2024-01-02T09:00",
            "2024-01-04T09:00",
            "2024-01-05T09:00",
        ]
    );
    Ok(())
}

#[test_log::test]
fn scenario_e_month_end_clamps() -> anyhow::Result<()> {
    let master = recurring("rent", "2024-01-31T10:00", "2024-01-31T11:00", Frequency::Monthly, 1)?;
    let instances = expand(&master, &days("2024-01-01", "2024-04-30")?);

    assert_eq!(
        starts(&instances),
        [
            "2024-01-31T10:00",
            "2024-02-29T10:00",
            "2024-03-31T10:00",
            "2024-04-30T10:00",
        ]
    );

    let common_year = expand(&master, &days("2025-01-01", "2025-03-31")?);
    assert_eq!(
        starts(&common_year),
        ["2025-01-31T10:00", "2025-02-28T10:00", "2025-03-31T10:00"]
    );
    Ok(())
}

#[test_log::test]
fn count_caps_series_from_anchor() -> anyhow::Result<()> {
    let mut master = recurring("course", "2024-01-01T18:00", "2024-01-01T19:00", Frequency::Weekly, 1)?;
    master.recurrence = Some(RecurrenceRule::weekly().with_count(3));

    assert_eq!(expand(&master, &days("2024-01-01", "2024-03-31")?).len(), 3);
    // Later windows see nothing once the count is spent.
    assert!(expand(&master, &days("2024-02-01", "2024-03-31")?).is_empty());

    let unlimited = ExpansionOptions {
        enforce_count: false,
        ..ExpansionOptions::default()
    };
    let expansion = expand_with_options(&master, &days("2024-02-01", "2024-02-29")?, unlimited);
    assert_eq!(expansion.instances.len(), 4);
    Ok(())
}

#[test_log::test]
fn long_running_series_reaches_distant_window() -> anyhow::Result<()> {
    let master = recurring("meds", "2015-06-01T08:00", "2015-06-01T08:15", Frequency::Daily, 1)?;
    let expansion = expand_with_options(
        &master,
        &days("2024-06-01", "2024-06-07")?,
        ExpansionOptions::default(),
    );

    assert_eq!(expansion.instances.len(), 7);
    assert!(expansion.diagnostics.is_empty());
    assert_eq!(expansion.instances[0].start(), local("2024-06-01T08:00")?);
    Ok(())
}

#[test_log::test]
fn iteration_cap_truncates_with_diagnostic() -> anyhow::Result<()> {
    let master = recurring("tick", "2024-01-01T00:00", "2024-01-01T00:30", Frequency::Daily, 1)?;
    let options = ExpansionOptions {
        max_iterations: 10,
        ..ExpansionOptions::default()
    };
    let expansion = expand_with_options(&master, &days("2024-01-01", "2024-12-31")?, options);

    // The original plus ten generated candidates.
    assert_eq!(expansion.instances.len(), 11);
    assert_eq!(
        expansion.diagnostics,
        [ExpansionDiagnostic::IterationCapReached {
            event_id: "tick".to_string(),
            cap: 10,
        }]
    );
    Ok(())
}

#[test_log::test]
fn inverted_interval_passes_through() -> anyhow::Result<()> {
    let master = recurring("broken", "2024-01-05T10:00", "2024-01-05T09:00", Frequency::Daily, 1)?;
    let expansion = expand_with_options(&master, &days("2024-01-01", "2024-01-31")?, ExpansionOptions::default());

    assert_eq!(expansion.instances.len(), 1);
    assert_eq!(expansion.instances[0].event, master);
    assert_eq!(
        expansion.diagnostics,
        [ExpansionDiagnostic::InvertedInterval {
            event_id: "broken".to_string(),
        }]
    );
    Ok(())
}

#[test_log::test]
fn exception_keeps_neighbouring_occurrences() -> anyhow::Result<()> {
    let master = recurring("review", "2023-02-07T10:00", "2023-02-07T11:00", Frequency::Weekly, 2)?;
    let range = days("2023-02-01", "2023-03-31")?;
    let excepted = date("2023-02-07")?;
    let before = expand(&master, &range);
    let after = expand(&master.clone().with_exception_date(excepted), &range);

    assert_eq!(
        starts(&before),
        [
            "2023-02-07T10:00",
            "2023-02-21T10:00",
            "2023-03-07T10:00",
            "2023-03-21T10:00",
        ]
    );
    assert_eq!(starts(&after), starts(&before)[1..]);
    let ids = |instances: &[EventInstance]| -> Vec<String> {
        instances.iter().map(|i| i.id().to_string()).collect()
    };
    assert_eq!(ids(&after), ids(&before)[1..]);
    // Surviving occurrences carry the updated exception set.
    assert!(after.iter().all(|i| i.event.is_excepted(excepted)));
    Ok(())
}
