use std::collections::BTreeMap;

use calendula_test::component::config::Settings;
use calendula_test::component::model::{
    EventInstance, Frequency, Holiday, HolidayTable, RecurrenceRule, StoredEvent,
};
use calendula_test::component::view::{Aggregator, aggregate};
use calendula_test::fixtures::{date, days, event, recurring};

fn holidays() -> anyhow::Result<HolidayTable> {
    Ok(HolidayTable::default()
        .with_holiday(Holiday::new("ny", "New Year's Day", date("2024-01-01")?, "public"))
        .with_holiday(Holiday::new("mlk", "Martin Luther King Jr. Day", date("2024-01-15")?, "public")))
}

#[test_log::test]
fn merges_calendars_holidays_and_sorts() -> anyhow::Result<()> {
    let mut gym = recurring("gym", "2024-01-01T07:00", "2024-01-01T08:00", Frequency::Daily, 2)?;
    gym.calendar_id = "health".to_string();
    let masters = vec![
        event("review", "Review", "2024-01-02T15:00", "2024-01-02T16:00")?,
        gym,
        event("offsite", "Offsite", "2024-01-03T00:00", "2024-01-04T00:00")?.all_day(),
    ];
    let enabled = BTreeMap::from([
        ("health".to_string(), false),
        ("personal".to_string(), true),
    ]);

    let out = aggregate(&masters, &days("2024-01-01", "2024-01-07")?, &holidays()?, &enabled);

    let titles: Vec<_> = out.iter().map(EventInstance::title).collect();
    assert_eq!(
        titles,
        [
            "New Year's Day",
            "Offsite",
            "gym",
            "Review",
            "gym",
            "gym",
            "gym",
        ]
    );
    let holiday = &out[0];
    assert_eq!(holiday.id(), "holiday-ny");
    assert_eq!(holiday.event.calendar_id, "personal");
    assert!(holiday.is_all_day() && holiday.is_holiday());
    Ok(())
}

#[test_log::test]
fn aggregation_is_deterministic() -> anyhow::Result<()> {
    let masters = vec![
        recurring("a", "2024-01-01T09:00", "2024-01-01T10:00", Frequency::Weekly, 1)?,
        recurring("b", "2024-01-01T09:00", "2024-01-01T09:30", Frequency::Daily, 1)?,
    ];
    let enabled = BTreeMap::from([("personal".to_string(), true)]);
    let range = days("2024-01-01", "2024-01-31")?;
    let table = holidays()?;

    let first = aggregate(&masters, &range, &table, &enabled);
    let second = aggregate(&masters, &range, &table, &enabled);
    assert_eq!(first, second);
    Ok(())
}

#[test_log::test]
fn sleep_blocks_deduplicated_across_calendars() -> anyhow::Result<()> {
    let mut second = event("sleep-2", "Sleep", "2024-01-01T23:00", "2024-01-02T07:00")?;
    second.calendar_id = "shared".to_string();
    let masters = vec![
        event("sleep-1", "Sleep", "2024-01-01T23:00", "2024-01-02T07:00")?,
        second,
        event("nap", "Nap", "2024-01-02T13:00", "2024-01-02T13:30")?,
        event("nap-copy", "Nap", "2024-01-02T13:00", "2024-01-02T13:30")?,
    ];
    let out = aggregate(&masters, &days("2024-01-01", "2024-01-02")?, &HolidayTable::default(), &BTreeMap::new());
    let ids: Vec<_> = out.iter().map(EventInstance::id).collect();
    assert_eq!(ids, ["sleep-1", "nap", "nap-copy"]);
    Ok(())
}

#[test_log::test]
fn settings_from_toml_drive_aggregation() -> anyhow::Result<()> {
    let settings = Settings::from_toml(
        r#"
        [aggregate]
        dedupe_sleep = false

        [recurrence]
        enforce_count = false
        "#,
    )?;
    let table = HolidayTable::default();
    let aggregator = Aggregator::new(&settings, &table);

    let mut class = recurring("class", "2024-01-01T18:00", "2024-01-01T19:00", Frequency::Daily, 1)?;
    class.recurrence = Some(RecurrenceRule::daily().with_count(2));
    let masters = vec![
        class,
        event("s1", "Sleep", "2024-01-01T01:00", "2024-01-01T07:00")?,
        event("s2", "Sleep", "2024-01-01T01:00", "2024-01-01T07:00")?,
    ];

    let out = aggregator.aggregate(&masters, &days("2024-01-01", "2024-01-04")?, &BTreeMap::new());
    assert_eq!(out.instances.iter().filter(|i| i.title() == "Sleep").count(), 2);
    assert_eq!(out.instances.iter().filter(|i| i.master_id() == "class").count(), 4);
    Ok(())
}

#[test_log::test]
fn stored_records_round_through_json() -> anyhow::Result<()> {
    let records: Vec<StoredEvent> = serde_json::from_str(
        r#"[
            {
                "id": "dentist",
                "calendarId": "personal",
                "title": "Dentist",
                "start": "2024-01-10T14:00:00",
                "end": "2024-01-10T15:00:00"
            },
            {
                "id": "yoga",
                "calendarId": "personal",
                "title": "Yoga",
                "start": "2024-01-08T07:00:00+01:00",
                "end": "2024-01-08T08:00:00+01:00",
                "recurrence": { "frequency": "weekly", "interval": 1 },
                "exceptionDates": ["2024-01-15"]
            },
            {
                "id": "ghost",
                "calendarId": "personal",
                "title": "Ghost",
                "start": "Invalid Date",
                "end": "2024-01-10T15:00:00"
            }
        ]"#,
    )?;
    let settings = Settings::default();
    let table = HolidayTable::default();

    let out = Aggregator::new(&settings, &table).aggregate_stored(
        records,
        &days("2024-01-08", "2024-01-21")?,
        &BTreeMap::new(),
    );

    assert_eq!(out.rejected, ["ghost"]);
    let summary: Vec<_> = out
        .instances
        .iter()
        .map(|i| format!("{} {}", i.title(), i.start().format("%m-%d %H:%M")))
        .collect();
    assert_eq!(summary, ["Yoga 01-08 07:00", "Dentist 01-10 14:00"]);
    Ok(())
}
