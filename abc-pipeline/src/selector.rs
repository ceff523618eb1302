use crate::util;

/// Selectors order the surviving rows and optionally truncate the list.
pub trait Selector<Q, R>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Default selection: sort descending by score, then truncate.
    fn select(&self, _query: &Q, rows: Vec<R>) -> Vec<R> {
        let mut sorted = self.sort(rows);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Decide if this selector should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Extract the score used for ordering.
    fn score(&self, row: &R) -> f64;

    /// Sort rows by their scores in descending order.
    ///
    /// NaN scores sink to the end of the list so they never surface as top
    /// rows. The sort is stable, so equal scores keep their incoming order.
    fn sort(&self, rows: Vec<R>) -> Vec<R> {
        let mut sorted = rows;
        sorted.sort_by(|a, b| {
            let sa = self.score(a);
            let sb = self.score(b);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) => sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal),
            }
        });
        sorted
    }

    /// Optionally cap the number of rows selected. Defaults to no cap.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
