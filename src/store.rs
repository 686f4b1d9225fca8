//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. State
//! transitions are plain methods on [`AppState`] and [`load_items`] so they can be tested
//! without a reactive runtime.

use leptos::prelude::*;
use reactive_stores::Store;
use wbs_core::{build_forest, ingest, ExpandState, FilterInput, Forest, ItemId, SkippedItem, WbsItem};

use crate::models::{Project, RawWbsItem};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Projects offered by the selector
    pub projects: Vec<Project>,
    /// Selected project ID
    pub current_project: Option<String>,
    /// Ingested WBS items of the selected project
    pub items: Vec<WbsItem>,
    /// Records dropped during ingestion
    pub skipped: Vec<SkippedItem>,
    /// Expanded tree nodes; reset on project change
    pub expand: ExpandState,
    /// Whether `expand` has been initialized for the current project
    pub expand_ready: bool,
    /// Filter form values
    pub filter_input: FilterInput,
    pub loading: bool,
    pub load_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch project; drops everything tied to the previous one
    pub fn select_project(&mut self, project_id: Option<String>) {
        let project_id = project_id.filter(|p| !p.trim().is_empty());
        if project_id == self.current_project {
            return;
        }
        self.current_project = project_id;
        self.items.clear();
        self.skipped.clear();
        self.expand = ExpandState::new();
        self.expand_ready = false;
        self.filter_input.parent.clear();
        self.load_error = None;
    }

    /// Pick the initial project once the project list arrives
    pub fn set_projects(&mut self, projects: Vec<Project>, preferred: Option<&str>) {
        self.projects = projects;
        if self.current_project.is_some() {
            return;
        }
        let initial = preferred
            .filter(|p| self.projects.iter().any(|proj| proj.project_id == *p))
            .map(str::to_string)
            .or_else(|| self.projects.first().map(|p| p.project_id.clone()));
        self.select_project(initial);
    }
}

/// Outcome of loading a fetched item list into the current project
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedItems {
    pub items: Vec<WbsItem>,
    pub skipped: Vec<SkippedItem>,
    pub expand: ExpandState,
}

/// Ingest `raw` and derive the next expand state: the initial state on the
/// first load of a project (`ready == false`), otherwise `current` minus ids
/// that no longer exist.
pub fn load_items(raw: Vec<RawWbsItem>, current: &ExpandState, ready: bool, auto_expand: bool) -> LoadedItems {
    let ingested = ingest(raw);
    let forest = build_forest(&ingested.items).forest;
    let expand = if ready {
        let mut next = current.clone();
        next.retain_existing(&forest);
        next
    } else {
        ExpandState::for_forest(&forest, auto_expand)
    };
    LoadedItems {
        items: ingested.items,
        skipped: ingested.skipped,
        expand,
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

// Loads write individual fields: a whole-store write would also notify
// `current_project` and re-run the effect that fetched the items.

pub fn store_select_project(store: &AppStore, project_id: Option<String>) {
    if store.current_project().get_untracked() == project_id {
        return;
    }
    store.write().select_project(project_id);
}

pub fn store_set_projects(store: &AppStore, projects: Vec<Project>, preferred: Option<&str>) {
    store.write().set_projects(projects, preferred);
}

pub fn store_set_items(store: &AppStore, raw: Vec<RawWbsItem>, auto_expand: bool) {
    let ready = store.expand_ready().get_untracked();
    let loaded = store.expand().with_untracked(|current| load_items(raw, current, ready, auto_expand));
    store.expand().set(loaded.expand);
    store.expand_ready().set(true);
    store.items().set(loaded.items);
    store.skipped().set(loaded.skipped);
    store.loading().set(false);
    store.load_error().set(None);
}

pub fn store_set_load_error(store: &AppStore, message: String) {
    store.loading().set(false);
    store.load_error().set(Some(message));
}

/// Flip one tree node
pub fn store_toggle_node(store: &AppStore, id: &ItemId) {
    store.expand().write().toggle(id);
}

/// Expand every node with children in the project forest
pub fn store_expand_all(store: &AppStore, forest: &Forest) {
    store.expand().write().expand_all(forest);
}

pub fn store_collapse_all(store: &AppStore) {
    store.expand().write().collapse_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: &str, parent: Option<&str>) -> RawWbsItem {
        RawWbsItem {
            item_id: Some(format!("PRJ001_{code}")),
            project_id: Some("PRJ001".into()),
            wbs_id: Some(code.into()),
            parent_id: parent.map(|p| format!("PRJ001_{p}")),
            ..Default::default()
        }
    }

    fn project(id: &str) -> Project {
        Project {
            project_id: id.into(),
            project_name: format!("Project {id}"),
            description: None,
            status: None,
            total_wbs: 0,
            completed_wbs: 0,
        }
    }

    fn id(s: &str) -> ItemId {
        ItemId::new(s)
    }

    #[test]
    fn test_first_load_auto_expands() {
        let loaded = load_items(vec![raw("1", None), raw("1.1", Some("1")), raw("2", None)], &ExpandState::new(), false, true);
        assert!(loaded.expand.is_expanded(&id("PRJ001_1")));
        assert_eq!(loaded.expand.len(), 1);
        assert_eq!(loaded.items.len(), 3);

        let collapsed = load_items(vec![raw("1", None), raw("1.1", Some("1"))], &ExpandState::new(), false, false);
        assert!(collapsed.expand.is_empty());
    }

    #[test]
    fn test_reload_keeps_user_expand_state() {
        // user collapsed everything after the first load
        let loaded = load_items(vec![raw("1", None), raw("1.1", Some("1"))], &ExpandState::new(), true, true);
        assert!(loaded.expand.is_empty());
    }

    #[test]
    fn test_reload_drops_removed_ids() {
        let first = load_items(
            vec![raw("1", None), raw("1.1", Some("1")), raw("2", None), raw("2.1", Some("2"))],
            &ExpandState::new(),
            false,
            true,
        );
        assert_eq!(first.expand.len(), 2);

        let reloaded = load_items(vec![raw("1", None), raw("1.1", Some("1"))], &first.expand, true, true);
        assert_eq!(reloaded.expand.len(), 1);
        assert!(reloaded.expand.is_expanded(&id("PRJ001_1")));
    }

    #[test]
    fn test_skipped_items_recorded() {
        let mut broken = raw("1", None);
        broken.wbs_id = Some("one".into());
        let loaded = load_items(vec![broken, raw("2", None)], &ExpandState::new(), false, false);
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.skipped.len(), 1);
    }

    fn loaded_state() -> AppState {
        let loaded = load_items(vec![raw("1", None), raw("1.1", Some("1"))], &ExpandState::new(), false, true);
        AppState {
            current_project: Some("PRJ001".into()),
            items: loaded.items,
            skipped: loaded.skipped,
            expand: loaded.expand,
            expand_ready: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_project_switch_resets_expand_state() {
        let mut state = loaded_state();
        state.filter_input.parent = "1".into();
        state.filter_input.owner = "IT".into();

        state.select_project(Some("PRJ002".into()));
        assert!(state.expand.is_empty());
        assert!(!state.expand_ready);
        assert!(state.items.is_empty());
        assert!(state.filter_input.parent.is_empty());
        assert_eq!(state.filter_input.owner, "IT");
    }

    #[test]
    fn test_reselecting_same_project_is_noop() {
        let mut state = loaded_state();
        state.select_project(Some("PRJ001".into()));
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.expand.len(), 1);
        assert!(state.expand_ready);
    }

    #[test]
    fn test_set_projects_prefers_configured_default() {
        let mut state = AppState::new();
        state.set_projects(vec![project("PRJ001"), project("PRJ002")], Some("PRJ002"));
        assert_eq!(state.current_project.as_deref(), Some("PRJ002"));

        let mut state = AppState::new();
        state.set_projects(vec![project("PRJ001")], Some("MISSING"));
        assert_eq!(state.current_project.as_deref(), Some("PRJ001"));

        let mut state = AppState::new();
        state.set_projects(Vec::new(), None);
        assert_eq!(state.current_project, None);
    }
}
