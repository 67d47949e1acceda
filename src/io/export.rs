//! CSV export for daily impact series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::grid::ComponentKind;
use crate::impact::{ComponentImpact, DailyImpact};
use crate::weather::WeatherField;

/// Impact columns written after the weather columns for each component kind.
pub fn impact_columns(kind: ComponentKind) -> &'static [&'static str] {
    match kind {
        ComponentKind::Load => &["PL_day", "QL_day"],
        ComponentKind::Generator => &["Pgen_day", "Qgen_day", "Efficiency"],
        ComponentKind::Branch => &["CL_day"],
        ComponentKind::Bus | ComponentKind::Substation => &[],
    }
}

/// Exports daily impacts to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(kind: ComponentKind, daily: &[DailyImpact], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(kind, daily, buf)
}

/// Writes daily impacts as CSV to any writer.
///
/// Header is `date`, the nine weather columns, then the impact columns for
/// `kind`. Values use four decimal places; NaN is written as `NaN`.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(kind: ComponentKind, daily: &[DailyImpact], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let header = std::iter::once("date")
        .chain(WeatherField::ALL.iter().map(|f| f.name()))
        .chain(impact_columns(kind).iter().copied());
    wtr.write_record(header)?;

    for day in daily {
        let mut row = Vec::with_capacity(1 + WeatherField::ALL.len() + 3);
        row.push(day.date().to_string());
        row.extend(
            WeatherField::ALL
                .iter()
                .map(|f| format!("{:.4}", day.weather.get(*f))),
        );
        match &day.impact {
            Some(ComponentImpact::Load(l)) => {
                row.push(format!("{:.4}", l.pl_day));
                row.push(format!("{:.4}", l.ql_day));
            }
            Some(ComponentImpact::Generator(g)) => {
                row.push(format!("{:.4}", g.pgen_day));
                row.push(format!("{:.4}", g.qgen_day));
                row.push(format!("{:.4}", g.efficiency));
            }
            Some(ComponentImpact::Branch(b)) => row.push(format!("{:.4}", b.cl_day)),
            None => {}
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::impact::{BranchImpact, LoadImpact};
    use crate::weather::WeatherObservation;

    fn day(n: u32, impact: Option<ComponentImpact>) -> DailyImpact {
        DailyImpact {
            weather: WeatherObservation {
                date: NaiveDate::from_ymd_opt(2020, 1, n).unwrap(),
                max_temperature: 12.5,
                avg_temperature: 8.0,
                min_temperature: 2.25,
                relative_humidity: 70.0,
                specific_humidity: 5.0,
                longwave_radiation: 250.0,
                shortwave_radiation: 300.0,
                precipitation: 1.0,
                wind_speed: 3.5,
            },
            impact,
        }
    }

    fn load_day(n: u32) -> DailyImpact {
        day(
            n,
            Some(ComponentImpact::Load(LoadImpact {
                pl_day: 100.0,
                ql_day: -4.5,
            })),
        )
    }

    #[test]
    fn header_follows_component_kind() {
        let mut buf = Vec::new();
        write_csv(ComponentKind::Load, &[load_day(1)], &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "date,max_temperature,avg_temperature,min_temperature,relative_humidity,\
             specific_humidity,longwave_radiation,shortwave_radiation,precipitation,\
             wind_speed,PL_day,QL_day"
        );
    }

    #[test]
    fn bus_rows_have_weather_only() {
        let mut buf = Vec::new();
        write_csv(ComponentKind::Bus, &[day(1, None), day(2, None)], &mut buf).ok();
        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        assert_eq!(rdr.headers().map(csv::StringRecord::len).ok(), Some(10));
        assert_eq!(rdr.records().count(), 2);
    }

    #[test]
    fn values_use_fixed_precision() {
        let mut buf = Vec::new();
        write_csv(ComponentKind::Load, &[load_day(3)], &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let row = output.as_deref().unwrap_or("").lines().nth(1).unwrap_or("");
        assert!(row.starts_with("2020-01-03,12.5000,8.0000,2.2500,"));
        assert!(row.ends_with(",100.0000,-4.5000"));
    }

    #[test]
    fn nan_capacity_is_written_verbatim() {
        let mut buf = Vec::new();
        let d = day(1, Some(ComponentImpact::Branch(BranchImpact { cl_day: f64::NAN })));
        write_csv(ComponentKind::Branch, &[d], &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        assert!(output.as_deref().unwrap_or("").trim_end().ends_with(",NaN"));
    }

    #[test]
    fn deterministic_output() {
        let daily: Vec<DailyImpact> = (1..=5).map(load_day).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(ComponentKind::Load, &daily, &mut buf1).ok();
        write_csv(ComponentKind::Load, &daily, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }
}
