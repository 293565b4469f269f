use serde::Serialize;

use crate::error::{Error, Result};

pub const COVER_NAME: &str = "Cover.png";
pub const BACK_NAME: &str = "back.png";
pub const DEFAULT_SCALE: f32 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    #[default]
    /// First page is Cover.png, last is back.png, interior pages count from 1
    SeparateCoverBack,
    /// Every page is numbered from 1
    Sequential,
}

impl NamingMode {
    pub fn from_separate_cover_back(separate: bool) -> Self {
        if separate {
            NamingMode::SeparateCoverBack
        } else {
            NamingMode::Sequential
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            NamingMode::SeparateCoverBack => {
                "Separate cover/back (Cover.png, back.png, then 1.png, 2.png, ...)"
            }
            NamingMode::Sequential => "Sequential numbering (1.png, 2.png, ...)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTask {
    pub page_index: usize,
    pub output_name: String,
}

impl RenderTask {
    fn new(page_index: usize, output_name: impl Into<String>) -> Self {
        RenderTask {
            page_index,
            output_name: output_name.into(),
        }
    }

    /// 1-based page number
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    tasks: Vec<RenderTask>,
    total_pages: usize,
    mode: NamingMode,
    scale: f32,
}

impl RenderPlan {
    pub fn tasks(&self) -> &[RenderTask] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn mode(&self) -> NamingMode {
        self.mode
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn into_tasks(self) -> Vec<RenderTask> {
        self.tasks
    }
}

impl<'a> IntoIterator for &'a RenderPlan {
    type Item = &'a RenderTask;
    type IntoIter = std::slice::Iter<'a, RenderTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Check that a scale factor can be handed to the renderer
pub fn validate_scale(scale: f32) -> Result<f32> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(Error::invalid(format!(
            "scale must be a positive number, got {}",
            scale
        )))
    }
}

/// Map every page of a `total_pages` document to the PNG name it is saved under.
///
/// In [`NamingMode::SeparateCoverBack`] the first page is `Cover.png`, the last
/// page is `back.png` and interior page `i` is `{i}.png`, so interior numbering
/// starts at 1 in both modes. A single page document only gets a cover. In
/// [`NamingMode::Sequential`] page `i` is `{i+1}.png`.
///
/// An empty document yields an empty plan.
pub fn build_plan(total_pages: i64, mode: NamingMode, scale: f32) -> Result<RenderPlan> {
    let total_pages = usize::try_from(total_pages).map_err(|_| {
        Error::invalid(format!(
            "total pages must be non-negative, got {}",
            total_pages
        ))
    })?;
    let scale = validate_scale(scale)?;

    let tasks: Vec<RenderTask> = match (mode, total_pages) {
        (_, 0) => Vec::new(),
        (NamingMode::SeparateCoverBack, 1) => vec![RenderTask::new(0, COVER_NAME)],
        (NamingMode::SeparateCoverBack, n) => {
            let mut tasks = Vec::with_capacity(n);
            tasks.push(RenderTask::new(0, COVER_NAME));
            tasks.extend((1..n - 1).map(|i| RenderTask::new(i, format!("{}.png", i))));
            tasks.push(RenderTask::new(n - 1, BACK_NAME));
            tasks
        }
        (NamingMode::Sequential, n) => (0..n)
            .map(|i| RenderTask::new(i, format!("{}.png", i + 1)))
            .collect(),
    };

    Ok(RenderPlan {
        tasks,
        total_pages,
        mode,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const COVER_BACK: NamingMode = NamingMode::SeparateCoverBack;
    const SEQUENTIAL: NamingMode = NamingMode::Sequential;

    fn pairs(plan: &RenderPlan) -> Vec<(usize, &str)> {
        plan.iter()
            .map(|t| (t.page_index, t.output_name.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_document() {
        assert!(build_plan(0, COVER_BACK, 2.0).unwrap().is_empty());
        assert!(build_plan(0, SEQUENTIAL, 2.0).unwrap().is_empty());
    }

    #[test]
    fn test_single_page_cover_only() {
        let plan = build_plan(1, COVER_BACK, 2.0).unwrap();
        assert_eq!(pairs(&plan), vec![(0, "Cover.png")]);
    }

    #[test]
    fn test_single_page_sequential() {
        let plan = build_plan(1, SEQUENTIAL, 2.0).unwrap();
        assert_eq!(pairs(&plan), vec![(0, "1.png")]);
    }

    #[test]
    fn test_two_pages_no_interior() {
        let plan = build_plan(2, COVER_BACK, 2.0).unwrap();
        assert_eq!(pairs(&plan), vec![(0, "Cover.png"), (1, "back.png")]);
    }

    #[test]
    fn test_cover_back_interior_numbering() {
        let plan = build_plan(5, COVER_BACK, 1.0).unwrap();
        assert_eq!(
            pairs(&plan),
            vec![
                (0, "Cover.png"),
                (1, "1.png"),
                (2, "2.png"),
                (3, "3.png"),
                (4, "back.png"),
            ]
        );
    }

    #[test]
    fn test_four_pages_cover_back() {
        let plan = build_plan(4, COVER_BACK, 1.0).unwrap();
        assert_eq!(
            pairs(&plan),
            vec![(0, "Cover.png"), (1, "1.png"), (2, "2.png"), (3, "back.png")]
        );
    }

    #[test]
    fn test_sequential() {
        let plan = build_plan(3, SEQUENTIAL, 2.0).unwrap();
        assert_eq!(pairs(&plan), vec![(0, "1.png"), (1, "2.png"), (2, "3.png")]);
    }

    #[test]
    fn test_len_and_distinct_names() {
        for mode in [COVER_BACK, SEQUENTIAL] {
            for total in 0..40 {
                let plan = build_plan(total, mode, 2.0).unwrap();
                assert_eq!(plan.len(), total as usize);
                assert_eq!(plan.total_pages(), total as usize);

                let names: HashSet<_> = plan.iter().map(|t| t.output_name.as_str()).collect();
                assert_eq!(names.len(), plan.len(), "duplicate names for {} pages", total);

                for (expected, task) in plan.iter().enumerate() {
                    assert_eq!(task.page_index, expected);
                    assert!(!task.output_name.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_negative_total_pages() {
        for mode in [COVER_BACK, SEQUENTIAL] {
            let err = build_plan(-1, mode, 2.0).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_invalid_scale() {
        for scale in [0.0, -1.5, f32::NAN, f32::INFINITY] {
            let err = build_plan(3, COVER_BACK, scale).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_scale_is_threaded_through() {
        let plan = build_plan(3, SEQUENTIAL, 1.25).unwrap();
        assert_eq!(plan.scale(), 1.25);
        assert_eq!(plan.mode(), SEQUENTIAL);
    }

    #[test]
    fn test_page_number_is_one_based() {
        let plan = build_plan(2, COVER_BACK, 2.0).unwrap();
        assert_eq!(plan.tasks()[1].page_number(), 2);
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(NamingMode::from_separate_cover_back(true), COVER_BACK);
        assert_eq!(NamingMode::from_separate_cover_back(false), SEQUENTIAL);
        assert_eq!(NamingMode::default(), COVER_BACK);
    }
}
