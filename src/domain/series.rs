// Series buffer - bounded sliding window shared by the datasets of one chart
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 600;

/// Values of one dataset, aligned with the owning buffer's labels.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub color: Option<String>,
    pub data: VecDeque<f64>,
}

/// Fixed-capacity append/trim store for one or more synchronized series.
///
/// Every push appends exactly one value to every series and one label; when
/// the label count exceeds capacity the oldest point is dropped from all of
/// them in the same call. Lengths therefore never diverge.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesBuffer {
    capacity: usize,
    labels: VecDeque<u64>,
    series: Vec<Series>,
}

impl SeriesBuffer {
    pub fn new<I>(capacity: usize, series: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let series = series
            .into_iter()
            .map(|(name, color)| Series {
                name,
                color,
                data: VecDeque::new(),
            })
            .collect();

        Self {
            capacity,
            labels: VecDeque::new(),
            series,
        }
    }

    /// Append one point per series under `index`. Series without a value in
    /// `values` receive 0; surplus values are ignored.
    pub fn push(&mut self, index: u64, values: &[f64]) {
        if values.len() != self.series.len() {
            tracing::trace!(
                "series buffer got {} values for {} series",
                values.len(),
                self.series.len()
            );
        }

        self.labels.push_back(index);
        for (i, series) in self.series.iter_mut().enumerate() {
            series.data.push_back(values.get(i).copied().unwrap_or(0.0));
        }

        if self.labels.len() > self.capacity {
            self.labels.pop_front();
            for series in &mut self.series {
                series.data.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        for series in &mut self.series {
            series.data.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &VecDeque<u64> {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(capacity: usize, names: &[&str]) -> SeriesBuffer {
        SeriesBuffer::new(capacity, names.iter().map(|n| (n.to_string(), None)))
    }

    #[test]
    fn test_push_past_capacity_drops_oldest() {
        let mut buf = buffer(DEFAULT_CAPACITY, &["speed"]);
        for i in 1..=601u64 {
            buf.push(i, &[i as f64 * 10.0]);
        }

        assert_eq!(buf.len(), 600);
        assert_eq!(buf.labels().front(), Some(&2));
        assert_eq!(buf.labels().back(), Some(&601));
        assert_eq!(buf.series()[0].data.front(), Some(&20.0));
        assert_eq!(buf.series()[0].data.len(), 600);
    }

    #[test]
    fn test_series_advance_in_lock_step() {
        let mut buf = buffer(5, &["left", "middle", "right"]);
        for i in 1..=12u64 {
            buf.push(i, &[1.0, 0.0, 1.0]);
            for series in buf.series() {
                assert_eq!(series.data.len(), buf.len());
            }
        }
        assert_eq!(buf.labels().iter().copied().collect::<Vec<_>>(), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_missing_values_default_to_zero() {
        let mut buf = buffer(10, &["a", "b", "c", "d"]);
        buf.push(1, &[1.0, 1.0]);
        buf.push(2, &[1.0, 1.0, 1.0, 1.0, 9.0]);

        let d = &buf.series()[3].data;
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0]);
        assert!(buf.series().iter().all(|s| s.data.len() == 2));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut buf = buffer(usize::MAX, &["a"]);
        buf.push(1, &[5.0]);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_clear_empties_every_series() {
        let mut buf = buffer(10, &["a", "b"]);
        buf.push(1, &[1.0, 2.0]);
        buf.clear();

        assert!(buf.is_empty());
        assert!(buf.series().iter().all(|s| s.data.is_empty()));
        buf.push(2, &[3.0, 4.0]);
        assert_eq!(buf.len(), 1);
    }
}
