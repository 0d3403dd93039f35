//! A Job is a contiguous run of cells, named by their row-major
//! indices.  Every way of cutting up a grid goes through the
//! constructors here, and each of them tiles `[0, width * height)`
//! exactly: consecutive jobs share an endpoint and nothing else.

use std::ops::Range;

use planes::Pixel;

/// The half-open range `[start, end)` of flattened indices, plus the
/// row width needed to turn an index back into a pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// First index covered
    pub start: usize,
    /// One past the last index covered
    pub end: usize,
    /// Row width of the grid the indices belong to
    pub width: usize,
}

impl Job {
    /// The single cell at `index`.
    pub fn cell(index: usize, width: usize) -> Job {
        Job {
            start: index,
            end: index + 1,
            width,
        }
    }

    /// Every cell of `row`.
    pub fn row(row: usize, width: usize) -> Job {
        Job {
            start: row * width,
            end: (row + 1) * width,
            width,
        }
    }

    /// One job per cell.
    pub fn cells(width: usize, height: usize) -> Vec<Job> {
        (0..width * height).map(|i| Job::cell(i, width)).collect()
    }

    /// One job per row.
    pub fn rows(width: usize, height: usize) -> Vec<Job> {
        (0..height).map(|r| Job::row(r, width)).collect()
    }

    /// Runs of `chunk` cells; the last one takes whatever is left.
    /// A `chunk` of zero is a caller error and yields no jobs.
    pub fn chunks(width: usize, height: usize, chunk: usize) -> Vec<Job> {
        if chunk == 0 {
            return vec![];
        }
        let total = width * height;
        (0..Job::chunk_count(total, chunk))
            .map(|n| Job {
                start: n * chunk,
                end: ::std::cmp::min((n * chunk).saturating_add(chunk), total),
                width,
            })
            .collect()
    }

    /// `ceil(total / chunk)`
    pub fn chunk_count(total: usize, chunk: usize) -> usize {
        total / chunk + if total % chunk == 0 { 0 } else { 1 }
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a job with nothing to do.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The covered indices.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The covered cells, as `(index, pixel)`.
    pub fn pixels<'a>(&'a self) -> impl Iterator<Item = (usize, Pixel)> + 'a {
        self.range().map(move |i| (i, Pixel::from_index(i, self.width)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every index in [0, total) exactly once.
    fn assert_tiles(jobs: &[Job], total: usize) {
        let mut seen = vec![0u8; total];
        for job in jobs {
            for i in job.range() {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "{:?}", seen);
    }

    #[test]
    fn rows_tile_the_grid() {
        let jobs = Job::rows(7, 5);
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs[4], Job { start: 28, end: 35, width: 7 });
        assert_tiles(&jobs, 35);
    }

    #[test]
    fn cells_tile_the_grid() {
        let jobs = Job::cells(4, 3);
        assert_eq!(jobs.len(), 12);
        assert!(jobs.iter().all(|j| j.len() == 1));
        assert_tiles(&jobs, 12);
    }

    #[test]
    fn chunks_leave_a_short_tail() {
        let jobs = Job::chunks(10, 10, 7);
        assert_eq!(jobs.len(), 15);
        assert_eq!(jobs[14].range(), 98..100);
        assert_eq!(jobs[14].len(), 2);
        assert_tiles(&jobs, 100);
    }

    #[test]
    fn chunks_larger_than_the_grid_make_one_job() {
        let jobs = Job::chunks(3, 3, 50);
        assert_eq!(jobs, vec![Job { start: 0, end: 9, width: 3 }]);
    }

    #[test]
    fn huge_chunks_do_not_overflow() {
        assert_eq!(Job::chunk_count(100, usize::max_value()), 1);
        let jobs = Job::chunks(10, 10, usize::max_value());
        assert_eq!(jobs, vec![Job { start: 0, end: 100, width: 10 }]);
        let jobs = Job::chunks(10, 10, usize::max_value() - 1);
        assert_eq!(jobs.len(), 1);
        assert_tiles(&jobs, 100);
    }

    #[test]
    fn chunks_that_divide_evenly() {
        for chunk in 1..=12 {
            let jobs = Job::chunks(4, 3, chunk);
            assert_eq!(jobs.len(), Job::chunk_count(12, chunk));
            assert_tiles(&jobs, 12);
        }
    }

    #[test]
    fn zero_chunk_yields_nothing() {
        assert!(Job::chunks(4, 4, 0).is_empty());
    }

    #[test]
    fn pixels_unflatten_across_rows() {
        let job = Job { start: 5, end: 8, width: 3 };
        let pixels: Vec<_> = job.pixels().collect();
        assert_eq!(
            pixels,
            vec![
                (5, Pixel { row: 1, col: 2 }),
                (6, Pixel { row: 2, col: 0 }),
                (7, Pixel { row: 2, col: 1 }),
            ]
        );
    }
}
