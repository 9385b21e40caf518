use crate::candidate::Candidate;
use crate::config::{AppConfig, ConfirmMode};
use crate::dedupe::dedupe_candidates;
use crate::error::Error;
use crate::fs::{FileSystem, LocalFileSystem};
use crate::naming::{detect_editions, RenamePlan};
use crate::parser::parse_hits;
use crate::progress::ResolutionReporter;
use crate::prompt::{Confirmation, Prompter};
use crate::query::{self, ResolutionRequest};
use crate::resolver::{self, KeyPrefix};
use crate::search::SearchProvider;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Where a single rename invocation is. Failures may leave any state except
/// `Done`; a declined confirmation returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameState {
    Idle,
    Resolving,
    Resolved,
    ConfirmPending,
    Renaming,
    Done,
    Failed,
}

impl RenameState {
    pub fn can_transition_to(self, next: RenameState) -> bool {
        use RenameState::*;
        match (self, next) {
            (Done, _) | (Failed, _) => false,
            (_, Failed) => true,
            (Idle, Resolving)
            | (Resolving, Resolved)
            | (Resolved, ConfirmPending)
            | (ConfirmPending, Renaming)
            | (Renaming, Done) => true,
            // Declined, or a plan-only run in permissive mode.
            (ConfirmPending, Idle) | (Resolved, Idle) => true,
            _ => false,
        }
    }
}

/// One invocation as the user asked for it.
#[derive(Debug, Clone, Default)]
pub struct RenameRequest {
    pub file: PathBuf,
    /// Overrides the title extracted from the file name.
    pub search_title: Option<String>,
    /// IMDb key prefix, normalized before use.
    pub imdb_key: Option<String>,
    pub edition: Option<String>,
    /// Required to move files in permissive mode.
    pub rename: bool,
}

impl RenameRequest {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(RenamePlan),
    /// The user said no; nothing was touched.
    Declined(RenamePlan),
    /// Permissive mode without the rename flag; nothing was touched.
    Planned(RenamePlan),
}

impl RenameOutcome {
    pub fn plan(&self) -> &RenamePlan {
        match self {
            RenameOutcome::Renamed(plan)
            | RenameOutcome::Declined(plan)
            | RenameOutcome::Planned(plan) => plan,
        }
    }
}

struct StateMachine<'r> {
    state: RenameState,
    reporter: &'r dyn ResolutionReporter,
}

impl<'r> StateMachine<'r> {
    fn new(reporter: &'r dyn ResolutionReporter) -> Self {
        Self {
            state: RenameState::Idle,
            reporter,
        }
    }

    fn advance(&mut self, next: RenameState) -> Result<(), Error> {
        if !self.state.can_transition_to(next) {
            return Err(Error::Other(format!(
                "Illegal rename state transition {:?} -> {:?}",
                self.state, next
            )));
        }
        debug!("Rename state {:?} -> {:?}", self.state, next);
        self.reporter.on_state_change(self.state, next);
        self.state = next;
        Ok(())
    }

    fn fail(&mut self) {
        if self.state.can_transition_to(RenameState::Failed) {
            self.reporter.on_state_change(self.state, RenameState::Failed);
            self.state = RenameState::Failed;
        }
    }
}

/// Resolves a file to one IMDb title and moves it into place.
pub struct RenameEngine<'a> {
    config: &'a AppConfig,
    search: &'a dyn SearchProvider,
    prompter: &'a dyn Prompter,
    fs: &'a dyn FileSystem,
}

impl<'a> RenameEngine<'a> {
    pub fn new(
        config: &'a AppConfig,
        search: &'a dyn SearchProvider,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            config,
            search,
            prompter,
            fs: &LocalFileSystem,
        }
    }

    pub fn with_file_system(mut self, fs: &'a dyn FileSystem) -> Self {
        self.fs = fs;
        self
    }

    /// Run the full pipeline:
    /// 1. Build the search request from the file name or the explicit title
    /// 2. Search, parse, de-duplicate and filter down to one candidate
    /// 3. Pick the edition and build the rename plan
    /// 4. Confirm and move
    pub fn run(
        &self,
        request: &RenameRequest,
        reporter: &dyn ResolutionReporter,
    ) -> Result<RenameOutcome, Error> {
        let mut machine = StateMachine::new(reporter);
        let result = self.drive(request, &mut machine);
        if result.is_err() {
            machine.fail();
        }
        result
    }

    fn drive(
        &self,
        request: &RenameRequest,
        machine: &mut StateMachine<'_>,
    ) -> Result<RenameOutcome, Error> {
        if !self.fs.exists(&request.file) {
            return Err(Error::FileNotFound(request.file.clone()));
        }
        let resolution = self.resolution_request(request)?;

        machine.advance(RenameState::Resolving)?;
        let candidate = self.resolve(&resolution, machine.reporter)?;
        machine.advance(RenameState::Resolved)?;

        let edition = self.choose_edition(&request.file, resolution.edition.as_deref())?;
        let plan = RenamePlan::build(&request.file, &candidate, edition.as_deref());
        info!(
            "Planned {} -> {}",
            request.file.display(),
            plan.destination_path.display()
        );

        let default = match self.config.confirm {
            ConfirmMode::Strict => Confirmation::Declined,
            ConfirmMode::Permissive if !request.rename => {
                machine.advance(RenameState::Idle)?;
                return Ok(RenameOutcome::Planned(plan));
            }
            ConfirmMode::Permissive => Confirmation::Confirmed,
        };

        machine.advance(RenameState::ConfirmPending)?;
        let message = format!(
            "Do you want to rename:\n  {}\nto:\n  {}\n?",
            file_name_display(&request.file),
            plan.relative_destination().display()
        );
        if !self.prompter.confirm(&message, default)?.is_confirmed() {
            info!("Rename of {} declined", request.file.display());
            machine.advance(RenameState::Idle)?;
            return Ok(RenameOutcome::Declined(plan));
        }

        machine.advance(RenameState::Renaming)?;
        self.execute(&plan)?;
        machine.advance(RenameState::Done)?;

        Ok(RenameOutcome::Renamed(plan))
    }

    pub fn resolution_request(&self, request: &RenameRequest) -> Result<ResolutionRequest, Error> {
        let resolution = query::request_for(
            &request.file,
            request.search_title.as_deref(),
            &self.config.naming,
        )?;
        Ok(resolution
            .with_key_prefix(request.imdb_key.as_deref().and_then(KeyPrefix::parse))
            .with_edition(request.edition.clone()))
    }

    /// Search and reduce the results to exactly one candidate.
    pub fn resolve(
        &self,
        request: &ResolutionRequest,
        reporter: &dyn ResolutionReporter,
    ) -> Result<Candidate, Error> {
        let candidates = self.search(request, reporter)?;
        let candidates = resolver::filter_candidates(candidates, request.key_prefix.as_ref());
        if !candidates.is_empty() {
            reporter.on_candidates(&candidates);
        }
        resolver::resolve(candidates, &request.search_title)
    }

    /// Issue the single search call and return the parsed, de-duplicated
    /// candidates in search order.
    pub fn search(
        &self,
        request: &ResolutionRequest,
        reporter: &dyn ResolutionReporter,
    ) -> Result<Vec<Candidate>, Error> {
        let query = request.query(self.config.search.site_filter.as_deref());
        info!("Searching for {:?}", query);
        reporter.on_search_start(&query);

        let start = Instant::now();
        let hits = match self.search.text(&query, self.config.search.max_results) {
            Ok(hits) => hits,
            Err(err) => {
                reporter.on_search_failed();
                return Err(err);
            }
        };
        let duration = start.elapsed();
        reporter.on_search_complete(hits.len(), duration.as_secs_f64());

        let candidates = dedupe_candidates(parse_hits(&hits));
        debug!(
            "Search returned {} hits, {} candidates in {:.2}s",
            hits.len(),
            candidates.len(),
            duration.as_secs_f64()
        );
        Ok(candidates)
    }

    /// An explicit edition wins. Otherwise offer each edition label found in
    /// the file name until one is accepted.
    pub fn choose_edition(
        &self,
        file: &Path,
        requested: Option<&str>,
    ) -> Result<Option<String>, Error> {
        if let Some(edition) = requested {
            return Ok(Some(edition.to_string()));
        }
        let file_name = file_name_display(file);
        for edition in detect_editions(&file_name, &self.config.naming.edition_labels) {
            let message = format!(
                "Do you want to use the edition \"{}\" detected in file name?",
                edition
            );
            if self
                .prompter
                .confirm(&message, Confirmation::Confirmed)?
                .is_confirmed()
            {
                debug!("Using edition {:?} from file name", edition);
                return Ok(Some(edition.to_string()));
            }
        }
        Ok(None)
    }

    /// Move the file. A directory created before a failed move is left behind.
    pub fn execute(&self, plan: &RenamePlan) -> Result<(), Error> {
        if self.fs.exists(&plan.destination_path) {
            return Err(Error::DestinationExists(plan.destination_path.clone()));
        }

        let dir = plan.destination_dir();
        self.fs
            .create_dir_all(dir)
            .map_err(|source| Error::Filesystem {
                action: "create directory",
                path: dir.to_path_buf(),
                source,
            })?;
        self.fs
            .rename(&plan.source_path, &plan.destination_path)
            .map_err(|source| Error::Filesystem {
                action: "rename",
                path: plan.source_path.clone(),
                source,
            })?;

        info!(
            "Renamed {} -> {}",
            plan.source_path.display(),
            plan.destination_path.display()
        );
        Ok(())
    }
}

fn file_name_display(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentReporter;
    use crate::prompt::DefaultAnswers;
    use crate::search::SearchHit;
    use std::cell::RefCell;
    use std::io;

    #[test]
    fn test_happy_path_transitions_allowed() {
        use RenameState::*;
        let path = [Idle, Resolving, Resolved, ConfirmPending, Renaming, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        use RenameState::*;
        assert!(!Idle.can_transition_to(Renaming));
        assert!(!Resolving.can_transition_to(Done));
        assert!(!Done.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Idle));
        assert!(ConfirmPending.can_transition_to(Idle));
        assert!(Renaming.can_transition_to(Failed));
    }

    struct MemoryFs {
        existing: RefCell<Vec<PathBuf>>,
        fail_rename: bool,
        created: RefCell<Vec<PathBuf>>,
    }

    impl MemoryFs {
        fn with(paths: &[&str]) -> Self {
            Self {
                existing: RefCell::new(paths.iter().map(PathBuf::from).collect()),
                fail_rename: false,
                created: RefCell::new(Vec::new()),
            }
        }
    }

    impl FileSystem for MemoryFs {
        fn exists(&self, path: &Path) -> bool {
            self.existing.borrow().iter().any(|p| p == path)
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            self.created.borrow_mut().push(path.to_path_buf());
            Ok(())
        }

        fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
            if self.fail_rename {
                return Err(io::Error::new(io::ErrorKind::Other, "cross-device link"));
            }
            let mut existing = self.existing.borrow_mut();
            existing.retain(|p| p != from);
            existing.push(to.to_path_buf());
            Ok(())
        }
    }

    fn inception_search(_query: &str, _max: usize) -> Result<Vec<SearchHit>, Error> {
        Ok(vec![SearchHit {
            title: "Inception (2010) - IMDb".to_string(),
            href: "https://www.imdb.com/title/tt1375666/".to_string(),
            body: String::new(),
        }])
    }

    #[test]
    fn test_missing_file_fails_before_search() {
        let config = AppConfig::default();
        let fs = MemoryFs::with(&[]);
        let search = |_: &str, _: usize| -> Result<Vec<SearchHit>, Error> {
            panic!("search must not run")
        };
        let engine = RenameEngine::new(&config, &search, &DefaultAnswers).with_file_system(&fs);
        let err = engine
            .run(&RenameRequest::new("Inception_t00.mkv"), &SilentReporter)
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_strict_default_declines() {
        let config = AppConfig::default();
        let fs = MemoryFs::with(&["rips/Inception_t00.mkv"]);
        let engine =
            RenameEngine::new(&config, &inception_search, &DefaultAnswers).with_file_system(&fs);
        let outcome = engine
            .run(&RenameRequest::new("rips/Inception_t00.mkv"), &SilentReporter)
            .unwrap();
        assert!(matches!(outcome, RenameOutcome::Declined(_)));
        assert!(fs.created.borrow().is_empty());
    }

    #[test]
    fn test_permissive_without_flag_only_plans() {
        let config = AppConfig {
            confirm: ConfirmMode::Permissive,
            ..AppConfig::default()
        };
        let fs = MemoryFs::with(&["rips/Inception_t00.mkv"]);
        let engine =
            RenameEngine::new(&config, &inception_search, &DefaultAnswers).with_file_system(&fs);
        let outcome = engine
            .run(&RenameRequest::new("rips/Inception_t00.mkv"), &SilentReporter)
            .unwrap();
        assert_eq!(
            outcome.plan().destination_path,
            PathBuf::from("rips/Inception (2010)/Inception (2010) {imdb-tt1375666}.mkv")
        );
        assert!(matches!(outcome, RenameOutcome::Planned(_)));
    }

    #[test]
    fn test_permissive_with_flag_renames() {
        let config = AppConfig {
            confirm: ConfirmMode::Permissive,
            ..AppConfig::default()
        };
        let fs = MemoryFs::with(&["rips/Inception_t00.mkv"]);
        let engine =
            RenameEngine::new(&config, &inception_search, &DefaultAnswers).with_file_system(&fs);
        let request = RenameRequest {
            rename: true,
            ..RenameRequest::new("rips/Inception_t00.mkv")
        };
        let outcome = engine.run(&request, &SilentReporter).unwrap();
        assert!(matches!(outcome, RenameOutcome::Renamed(_)));
        assert_eq!(
            fs.created.borrow().as_slice(),
            &[PathBuf::from("rips/Inception (2010)")]
        );
        assert!(fs.exists(&outcome.plan().destination_path));
        assert!(!fs.exists(Path::new("rips/Inception_t00.mkv")));
    }

    #[test]
    fn test_rename_failure_is_surfaced_and_directory_kept() {
        let config = AppConfig {
            confirm: ConfirmMode::Permissive,
            ..AppConfig::default()
        };
        let fs = MemoryFs {
            fail_rename: true,
            ..MemoryFs::with(&["Inception_t00.mkv"])
        };
        let engine =
            RenameEngine::new(&config, &inception_search, &DefaultAnswers).with_file_system(&fs);
        let request = RenameRequest {
            rename: true,
            ..RenameRequest::new("Inception_t00.mkv")
        };
        match engine.run(&request, &SilentReporter).unwrap_err() {
            Error::Filesystem { action, source, .. } => {
                assert_eq!(action, "rename");
                assert_eq!(source.to_string(), "cross-device link");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(fs.created.borrow().len(), 1);
    }

    #[test]
    fn test_existing_destination_is_not_overwritten() {
        let config = AppConfig {
            confirm: ConfirmMode::Permissive,
            ..AppConfig::default()
        };
        let fs = MemoryFs::with(&[
            "Inception_t00.mkv",
            "Inception (2010)/Inception (2010) {imdb-tt1375666}.mkv",
        ]);
        let engine =
            RenameEngine::new(&config, &inception_search, &DefaultAnswers).with_file_system(&fs);
        let request = RenameRequest {
            rename: true,
            ..RenameRequest::new("Inception_t00.mkv")
        };
        let err = engine.run(&request, &SilentReporter).unwrap_err();
        assert!(matches!(err, Error::DestinationExists(_)));
        assert!(fs.created.borrow().is_empty());
    }
}
