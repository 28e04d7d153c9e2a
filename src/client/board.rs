// src/client/board.rs
//! Job board controller: the presentation state behind the job list,
//! search bar, facet pickers, detail modal and save icons.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::app_log;
use crate::client::filter;
use crate::client::notice::Notice;
use crate::client::saved_jobs::SavedJobsManager;
use crate::client::source::JobSource;
use crate::client::store::KeyValueStore;
use crate::client::theme::{BoardConfig, Theme};
use crate::types::{Facet, FilterCriteria, Job, SalaryRange};
use crate::utils::preview;

/// Shared flag cleared when the owning screen goes away. Async results
/// are only applied while it is still set.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied(usize),
    Failed,
    Discarded,
}

pub struct JobBoard<S: KeyValueStore + ?Sized> {
    config: BoardConfig,
    saved_jobs: SavedJobsManager<S>,
    liveness: Liveness,
    jobs: Vec<Job>,
    visible: Vec<Job>,
    saved: Vec<Job>,
    criteria: FilterCriteria,
    selected: Option<Job>,
    notice: Option<Notice>,
}

impl<S: KeyValueStore + ?Sized> JobBoard<S> {
    pub fn new(config: BoardConfig, store: Arc<S>) -> Self {
        Self {
            config,
            saved_jobs: SavedJobsManager::new(store),
            liveness: Liveness::new(),
            jobs: Vec::new(),
            visible: Vec::new(),
            saved: Vec::new(),
            criteria: FilterCriteria::default(),
            selected: None,
            notice: None,
        }
    }

    /// Handle for the navigation layer to signal unmount.
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Fetch jobs and the saved set, applying them only if the screen is
    /// still mounted when both arrive.
    pub async fn mount<J: JobSource + ?Sized>(&mut self, source: &J) -> LoadOutcome {
        let fetched = source.fetch_jobs().await;
        let saved = self.saved_jobs.load().await;

        if !self.liveness.is_alive() {
            app_log!(debug, "Job board unmounted during load, discarding result");
            return LoadOutcome::Discarded;
        }

        self.saved = saved;
        match fetched {
            Ok(jobs) => {
                let count = jobs.len();
                self.jobs = jobs;
                self.refilter();
                LoadOutcome::Applied(count)
            }
            Err(e) => {
                app_log!(error, "Error fetching jobs: {:#}", e);
                self.jobs.clear();
                self.visible.clear();
                self.notice = Some(Notice::JobsUnavailable);
                LoadOutcome::Failed
            }
        }
    }

    fn refilter(&mut self) {
        self.visible = filter::filter(&self.jobs, &self.criteria);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.refilter();
    }

    pub fn set_category(&mut self, category: impl Into<Facet>) {
        self.criteria.category = category.into();
        self.refilter();
    }

    pub fn set_location(&mut self, location: impl Into<Facet>) {
        self.criteria.location = location.into();
        self.refilter();
    }

    pub fn set_salary_range(&mut self, range: Option<SalaryRange>) {
        self.criteria.salary_range = range;
        self.refilter();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn visible_jobs(&self) -> &[Job] {
        &self.visible
    }

    pub fn featured_jobs(&self) -> Vec<Job> {
        filter::featured(&self.jobs, self.config.featured_limit)
    }

    pub fn saved_jobs(&self) -> &[Job] {
        &self.saved
    }

    pub fn is_saved(&self, job: &Job) -> bool {
        filter::is_saved(&self.saved, job)
    }

    pub fn card_preview(&self, job: &Job) -> String {
        preview(&job.description, self.config.preview_chars)
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    /// Open the detail modal for a loaded job.
    pub fn select(&mut self, job_id: &str) -> Option<&Job> {
        self.selected = self.jobs.iter().find(|job| job.id == job_id).cloned();
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Job> {
        self.selected.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn related_to_selected(&self) -> Vec<Job> {
        match &self.selected {
            Some(job) => filter::related(&self.jobs, job, self.config.related_limit),
            None => Vec::new(),
        }
    }

    /// Toggle the saved state of `job`. The in-memory set only changes
    /// after the store confirms the write.
    pub async fn toggle_save(&mut self, job: &Job) -> Result<bool> {
        let result = self.saved_jobs.toggle(job, &self.saved).await;

        if !self.liveness.is_alive() {
            return result.map(|toggled| toggled.was_added);
        }

        match result {
            Ok(toggled) => {
                self.saved = toggled.jobs;
                self.notice = Some(if toggled.was_added {
                    Notice::JobSaved
                } else {
                    Notice::JobUnsaved
                });
                Ok(toggled.was_added)
            }
            Err(e) => {
                self.notice = Some(Notice::SaveFailed);
                Err(e)
            }
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the pending notice, clearing it.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::testing::FlakyStore;
    use crate::client::store::MemoryStore;

    struct StaticSource(Vec<Job>);

    #[rocket::async_trait]
    impl JobSource for StaticSource {
        async fn fetch_jobs(&self) -> Result<Vec<Job>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[rocket::async_trait]
    impl JobSource for FailingSource {
        async fn fetch_jobs(&self) -> Result<Vec<Job>> {
            anyhow::bail!("network unreachable")
        }
    }

    /// Clears the board's liveness flag while the fetch is in flight.
    struct UnmountingSource(Liveness, Vec<Job>);

    #[rocket::async_trait]
    impl JobSource for UnmountingSource {
        async fn fetch_jobs(&self) -> Result<Vec<Job>> {
            self.0.unmount();
            Ok(self.1.clone())
        }
    }

    fn jobs() -> Vec<Job> {
        vec![
            Job::new("1", "Engineer", "Acme")
                .with_category("Tech")
                .with_location("Remote")
                .with_description("x".repeat(100))
                .featured(),
            Job::new("2", "Designer", "Acme")
                .with_category("Design")
                .with_location("London"),
            Job::new("3", "Data Engineer", "Globex")
                .with_category("Tech")
                .with_location("Tokyo"),
        ]
    }

    #[tokio::test]
    async fn test_mount_and_filter() {
        let mut board = JobBoard::new(BoardConfig::default(), Arc::new(MemoryStore::new()));
        assert_eq!(board.mount(&StaticSource(jobs())).await, LoadOutcome::Applied(3));
        assert_eq!(board.visible_jobs().len(), 3);

        board.set_search_text("acme");
        assert_eq!(board.visible_jobs().len(), 2);

        board.set_category("Design");
        assert_eq!(board.visible_jobs()[0].id, "2");

        board.set_category("All");
        board.set_search_text("");
        board.set_location("Tokyo");
        assert_eq!(board.visible_jobs()[0].id, "3");
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_list_and_notice() {
        let mut board = JobBoard::new(BoardConfig::default(), Arc::new(MemoryStore::new()));
        assert_eq!(board.mount(&FailingSource).await, LoadOutcome::Failed);
        assert!(board.visible_jobs().is_empty());
        assert_eq!(board.take_notice(), Some(Notice::JobsUnavailable));
        assert_eq!(board.notice(), None);
    }

    #[tokio::test]
    async fn test_result_discarded_after_unmount() {
        let mut board = JobBoard::new(BoardConfig::default(), Arc::new(MemoryStore::new()));
        let source = UnmountingSource(board.liveness(), jobs());
        assert_eq!(board.mount(&source).await, LoadOutcome::Discarded);
        assert!(board.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_save_and_reload() {
        let store = Arc::new(MemoryStore::new());
        let mut board = JobBoard::new(BoardConfig::default(), store.clone());
        board.mount(&StaticSource(jobs())).await;

        let job = board.jobs()[0].clone();
        assert!(board.toggle_save(&job).await.unwrap());
        assert!(board.is_saved(&job));
        assert_eq!(board.take_notice(), Some(Notice::JobSaved));

        let mut reopened = JobBoard::new(BoardConfig::default(), store);
        reopened.mount(&StaticSource(jobs())).await;
        assert!(reopened.is_saved(&job));

        assert!(!reopened.toggle_save(&job).await.unwrap());
        assert!(!reopened.is_saved(&job));
        assert_eq!(reopened.take_notice(), Some(Notice::JobUnsaved));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_job_unsaved() {
        let store = Arc::new(FlakyStore::new());
        let mut board = JobBoard::new(BoardConfig::default(), store.clone());
        board.mount(&StaticSource(jobs())).await;
        let job = board.jobs()[1].clone();

        store.fail_writes(true);
        assert!(board.toggle_save(&job).await.is_err());

        assert!(board.saved_jobs().is_empty());
        assert!(!board.is_saved(&job));
        assert_eq!(board.take_notice(), Some(Notice::SaveFailed));
    }

    #[tokio::test]
    async fn test_detail_modal_related_and_featured() {
        let mut board = JobBoard::new(BoardConfig::default(), Arc::new(MemoryStore::new()));
        board.mount(&StaticSource(jobs())).await;

        assert_eq!(board.select("1").map(|j| j.title.clone()), Some("Engineer".into()));
        let related: Vec<_> = board.related_to_selected().into_iter().map(|j| j.id).collect();
        assert_eq!(related, vec!["3"]);

        board.close_detail();
        assert!(board.related_to_selected().is_empty());
        assert!(board.select("missing").is_none());

        assert_eq!(board.featured_jobs().len(), 1);
        let preview = board.card_preview(&board.jobs()[0].clone());
        assert_eq!(preview.len(), 83);
    }

    #[tokio::test]
    async fn test_theme_is_explicit_config() {
        let config = BoardConfig::default().with_theme(Theme::dark());
        let mut board = JobBoard::new(config, Arc::new(MemoryStore::new()));
        assert!(board.theme().dark);
        board.set_theme(Theme::light());
        assert!(!board.theme().dark);
    }
}
