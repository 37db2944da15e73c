use freqdate::construct::{DateArraySource, InputKind};
use freqdate::{date_array, Date, DateArray, DateOperand, Frequency, Relation};

#[test]
fn quarterly_date_from_year_and_quarter() -> freqdate::Result<()> {
    let d = Date::from_fields(Frequency::Quarterly, Some(2004), Some(3), None, None, None, None, None)?;
    assert_eq!(d.ordinal(), 8015);
    assert_eq!(d.year()?, 2004);
    assert_eq!(d.month()?, 9);
    assert_eq!(d.day()?, 30);
    assert_eq!(d.to_string(), "2004Q3");
    Ok(())
}

#[test]
fn business_day_rejects_weekend_construction() {
    let err = Date::from_fields(Frequency::Business, Some(2007), None, Some(1), Some(6), None, None, None)
        .unwrap_err();
    assert!(matches!(err, freqdate::Error::InvalidWeekend(_)));
}

#[test]
fn asfreq_quarterly_to_daily_respects_relation() -> freqdate::Result<()> {
    let q = Date::from_fields(Frequency::Quarterly, Some(2004), Some(3), None, None, None, None, None)?;
    let start = q.asfreq(Frequency::Daily, Relation::Before)?;
    let end = q.asfreq(Frequency::Daily, Relation::After)?;
    assert_eq!((start.year()?, start.month()?, start.day()?), (2004, 7, 1));
    assert_eq!((end.year()?, end.month()?, end.day()?), (2004, 9, 30));
    Ok(())
}

#[test]
fn asfreq_daily_to_monthly_is_relation_insensitive() -> freqdate::Result<()> {
    let d = Date::from_fields(Frequency::Daily, Some(2004), None, Some(9), Some(15), None, None, None)?;
    let before = d.asfreq(Frequency::Monthly, Relation::Before)?;
    let after = d.asfreq(Frequency::Monthly, Relation::After)?;
    assert_eq!(before, after);
    assert_eq!(before.month()?, 9);
    Ok(())
}

#[test]
fn date_array_tracks_business_week_gaps() -> freqdate::Result<()> {
    let dates = [(2020, 1, 6), (2020, 1, 7), (2020, 1, 8), (2020, 1, 9), (2020, 1, 10)]
        .into_iter()
        .map(|(y, m, d)| Date::from_fields(Frequency::Business, Some(y), None, Some(m), Some(d), None, None, None))
        .collect::<freqdate::Result<Vec<_>>>()?;
    let array = DateArray::from_dates(Frequency::Business, &dates)?;

    assert!(array.isfull());
    assert!(array.isvalid());
    assert!(!array.has_duplicated_dates());
    assert_eq!(array.get_steps(), &[1, 1, 1, 1]);

    let with_gap = DateArray::new(Frequency::Business, vec![dates[0].ordinal(), dates[0].ordinal() + 3]);
    assert!(!with_gap.isfull());
    Ok(())
}

#[test]
fn date_array_sub_against_anchor_date() -> freqdate::Result<()> {
    let anchor = Date::from_fields(Frequency::Daily, Some(2020), None, Some(1), Some(1), None, None, None)?;
    let array = DateArray::new(Frequency::Daily, vec![anchor.ordinal(), anchor.ordinal() + 5, anchor.ordinal() + 9]);

    let freqdate::ArithResult::Diffs(diffs) = array.sub(DateOperand::Date(anchor))? else {
        panic!("expected elementwise diffs");
    };
    assert_eq!(diffs, vec![0, 5, 9]);

    let monthly_anchor =
        Date::from_fields(Frequency::Monthly, Some(2020), None, Some(1), None, None, None, None)?;
    assert!(array.sub(DateOperand::Date(monthly_anchor)).is_err());
    Ok(())
}

#[test]
fn guess_freq_recovers_business_cadence() {
    let days: Vec<f64> = [(2020, 1, 6), (2020, 1, 7), (2020, 1, 8), (2020, 1, 9), (2020, 1, 10), (2020, 1, 13)]
        .into_iter()
        .map(|(y, m, d)| freqdate::calendar::Instant::from_ymd(y, m, d).unwrap().absolute_day_frac())
        .collect();
    assert_eq!(freqdate::guess_freq(&days), Frequency::Business);
}

#[test]
fn frequency_normalize_accepts_aliases() -> freqdate::Result<()> {
    assert_eq!(Frequency::normalize("quarterly")?, Frequency::Quarterly);
    assert_eq!(Frequency::normalize("Q")?, Frequency::Quarterly);
    assert!(Frequency::normalize("not-a-freq").is_err());
    Ok(())
}

#[test]
fn date_array_fromrange_scenario_s3() -> freqdate::Result<()> {
    let start = Date::from_fields(Frequency::Daily, Some(2007), None, Some(1), Some(1), None, None, None)?;
    let arr = date_array(
        DateArraySource::Range { start, end: None, length: Some(5) },
        true,
        None,
    )?;
    assert!(arr.isfull());
    assert!(arr.isvalid());
    assert_eq!(
        arr.get(2).unwrap(),
        Date::from_fields(Frequency::Daily, Some(2007), None, Some(1), Some(3), None, None, None)?
    );
    Ok(())
}

#[test]
fn date_array_fromlist_strings_guesses_weekly() -> freqdate::Result<()> {
    let input = InputKind::Strings(
        ["2020-01-05", "2020-01-12", "2020-01-19"].iter().map(|s| (*s).to_owned()).collect(),
    );
    let arr = date_array(DateArraySource::List(input), true, None)?;
    assert_eq!(arr.freq(), Frequency::Weekly);
    assert_eq!(arr.len(), 3);
    Ok(())
}

#[test]
fn date_array_toordinal_and_tostring() -> freqdate::Result<()> {
    let start = Date::from_fields(Frequency::Monthly, Some(2004), None, Some(1), None, None, None, None)?;
    let arr = date_array(DateArraySource::Range { start, end: None, length: Some(3) }, true, None)?;
    assert_eq!(
        arr.tostring()?.to_vec(),
        vec!["Jan-2004".to_owned(), "Feb-2004".to_owned(), "Mar-2004".to_owned()]
    );
    let ordinals = arr.toordinal()?;
    assert_eq!(ordinals.len(), 3);
    assert!(ordinals[0] < ordinals[1]);
    Ok(())
}
