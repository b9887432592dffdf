use crate::Errors;
use anyhow::Result;
use itertools::Itertools;
use std::fmt;

const CHART_WIDTH: usize = 50;

/// One identity of the speed chart
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedBar {
    pub id: u64,
    pub speed: i64,
    pub over_limit: bool,
}

/// Bar summary of the captured speeds with the speed limit as the reference line
///
/// `Display` renders one text row per identity; the limit column is marked with `|`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedChart {
    bars: Vec<SpeedBar>,
    limit: i64,
}

impl SpeedChart {
    /// Builds the chart from parallel identity and speed lists
    ///
    /// Empty lists make an empty chart.
    ///
    pub fn new(ids: &[u64], speeds: &[i64], limit: i64) -> Result<Self> {
        if ids.len() != speeds.len() {
            return Err(Errors::DatasetLengthMismatch {
                ids: ids.len(),
                speeds: speeds.len(),
            }
            .into());
        }

        let bars = ids
            .iter()
            .zip_eq(speeds.iter())
            .map(|(&id, &speed)| SpeedBar {
                id,
                speed,
                over_limit: speed > limit,
            })
            .collect();

        Ok(Self { bars, limit })
    }

    pub fn bars(&self) -> &[SpeedBar] {
        &self.bars
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    fn scale(&self) -> f64 {
        self.bars
            .iter()
            .map(|b| b.speed)
            .chain([self.limit, 1])
            .max()
            .unwrap_or(1) as f64
    }

    fn columns(&self, value: i64) -> usize {
        let cols = (value.max(0) as f64 / self.scale() * CHART_WIDTH as f64).round() as usize;
        cols.min(CHART_WIDTH)
    }
}

impl fmt::Display for SpeedChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SPEED OF VEHICLES CROSSING ROAD")?;
        writeln!(f, "{:>8} | SPEED (px/s), limit {}", "ID", self.limit)?;

        let limit_col = self.columns(self.limit);
        for bar in &self.bars {
            let filled = self.columns(bar.speed);
            let row = (0..=CHART_WIDTH)
                .map(|col| match (col < filled, col == limit_col) {
                    (_, true) => '|',
                    (true, false) => '#',
                    (false, false) => ' ',
                })
                .collect::<String>();
            let mark = if bar.over_limit { " !" } else { "" };
            writeln!(f, "{:>8} | {} {}{}", bar.id, row, bar.speed, mark)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::trackers::speed::chart::SpeedChart;
    use crate::Errors;

    #[test]
    fn empty_chart_is_valid() {
        let chart = SpeedChart::new(&[], &[], 150).unwrap();
        assert!(chart.bars().is_empty());
        let text = chart.to_string();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn bars_follow_input_order() {
        let chart = SpeedChart::new(&[4, 1, 9], &[100, 300, 150], 150).unwrap();
        let over = chart.bars().iter().map(|b| b.over_limit).collect::<Vec<_>>();
        assert_eq!(over, vec![false, true, false]);
        assert_eq!(chart.bars()[1].id, 1);

        let text = chart.to_string();
        let rows = text.lines().skip(2).collect::<Vec<_>>();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].ends_with("300 !"));
        assert!(rows[0].ends_with("100"));
        // all rows carry the limit marker in the same column
        let col = rows[0].find('|').unwrap();
        let limit_col = rows[0][col + 1..].find('|').map(|c| c + col + 1);
        assert!(limit_col.is_some());
        for r in &rows {
            assert_eq!(r.as_bytes()[limit_col.unwrap()], b'|');
        }
    }

    #[test]
    fn mismatched_lengths() {
        let res = SpeedChart::new(&[1, 2], &[10], 150);
        let err = res.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Errors>(),
            Some(Errors::DatasetLengthMismatch { ids: 2, speeds: 1 })
        ));
    }
}
