use std::collections::BTreeMap;

use calendula_test::component::config::Settings;
use calendula_test::component::model::{EventInstance, Frequency, HolidayTable, SegmentType};
use calendula_test::component::time::{end_of_day, start_of_day};
use calendula_test::component::view::{DayPlan, aggregate, layout, segment_for_day};
use calendula_test::fixtures::{date, days, event, local, recurring};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test_log::test]
fn scenario_c_cross_midnight_segments() -> anyhow::Result<()> {
    let shift = EventInstance::from_master(&event(
        "shift",
        "Night shift",
        "2024-03-10T22:00",
        "2024-03-11T06:00",
    )?);
    let input = [shift];

    let first = segment_for_day(&input, date("2024-03-10")?);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].segment_type, Some(SegmentType::Start));
    assert_eq!(first[0].start(), local("2024-03-10T22:00")?);
    assert_eq!(first[0].end(), end_of_day(date("2024-03-10")?));

    let second = segment_for_day(&input, date("2024-03-11")?);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].segment_type, Some(SegmentType::End));
    assert_eq!(second[0].start(), start_of_day(date("2024-03-11")?));
    assert_eq!(second[0].end(), local("2024-03-11T06:00")?);
    Ok(())
}

#[test_log::test]
fn scenario_d_overlap_columns() -> anyhow::Result<()> {
    let input = [
        EventInstance::from_master(&event("a", "A", "2024-05-06T09:00", "2024-05-06T10:00")?),
        EventInstance::from_master(&event("b", "B", "2024-05-06T09:30", "2024-05-06T10:30")?),
        EventInstance::from_master(&event("c", "C", "2024-05-06T11:00", "2024-05-06T12:00")?),
    ];
    let boxes = layout(&input, date("2024-05-06")?);

    assert_eq!(boxes.len(), 3);
    assert!(close(boxes["a"].width, 50.0) && close(boxes["a"].left, 0.0));
    assert!(close(boxes["b"].width, 50.0) && close(boxes["b"].left, 50.0));
    assert!(close(boxes["c"].width, 100.0) && close(boxes["c"].left, 0.0));
    assert_eq!(boxes["a"].overlapping_events, 2);
    assert_eq!(boxes["b"].overlapping_events, 2);
    assert_eq!(boxes["c"].overlapping_events, 1);
    Ok(())
}

#[test_log::test]
fn week_of_day_plans_from_one_aggregation() -> anyhow::Result<()> {
    let masters = vec![
        recurring("standup", "2024-03-11T09:00", "2024-03-11T09:15", Frequency::Daily, 1)?,
        event("shift", "Night shift", "2024-03-12T22:00", "2024-03-13T06:00")?,
        event("pairing", "Pairing", "2024-03-13T05:30", "2024-03-13T07:00")?,
        event("conf", "Conference", "2024-03-13T00:00", "2024-03-15T00:00")?.all_day(),
    ];
    let range = days("2024-03-11", "2024-03-15")?;
    let instances = aggregate(&masters, &range, &HolidayTable::default(), &BTreeMap::new());
    let settings = Settings::default();

    let tuesday = DayPlan::build(&instances, date("2024-03-12")?, &settings);
    assert!(tuesday.all_day.is_empty());
    let ids: Vec<_> = tuesday.timed.iter().map(EventInstance::master_id).collect();
    assert_eq!(ids, ["standup", "shift"]);

    let wednesday = DayPlan::build(&instances, date("2024-03-13")?, &settings);
    let strip: Vec<_> = wednesday.all_day.iter().map(EventInstance::id).collect();
    assert_eq!(strip, ["conf"]);
    let shift = wednesday
        .boxes
        .get("shift")
        .ok_or_else(|| anyhow::anyhow!("shift has no box on its end day"))?;
    let pairing = wednesday
        .boxes
        .get("pairing")
        .ok_or_else(|| anyhow::anyhow!("pairing has no box"))?;
    assert_eq!(shift.overlapping_events, 2);
    assert!(close(shift.left, 0.0) && close(pairing.left, 50.0));
    assert!(close(shift.top, 0.0));

    let friday = DayPlan::build(&instances, date("2024-03-15")?, &settings);
    assert!(friday.all_day.is_empty(), "all-day span ending at midnight stops on Thursday");
    assert_eq!(friday.timed.len(), 1);
    Ok(())
}
