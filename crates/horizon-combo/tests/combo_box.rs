//! End-to-end behaviour of the combo box data-source core, driven the way
//! a hosting view layer would drive it.

use std::sync::Arc;

use parking_lot::Mutex;

use horizon_combo::prelude::*;

type StringSource = DiffableExpandableDataSource<String, String, String>;

fn selection_provider(item: Option<&String>) -> String {
    item.cloned().unwrap_or_else(|| "Select...".into())
}

fn header_provider(_loc: RowLocation, group: &String, expanded: bool) -> String {
    format!("{group}:{}", if expanded { "open" } else { "closed" })
}

fn item_provider(_loc: RowLocation, item: &String, group: Option<&String>) -> String {
    match group {
        Some(group) => format!("{item}@{group}"),
        None => item.clone(),
    }
}

fn diffable_source() -> StringSource {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    DiffableExpandableDataSource::new(selection_provider, header_provider, item_provider)
}

fn sample_contents() -> NestedList<String, String> {
    let mut list = NestedList::new();
    list.push_item("Alpha".into());
    list.push_group("Beta".into(), vec!["Lambda".into(), "Kappa".into()]);
    list.push_group(
        "Gamma".into(),
        vec!["Omega".into(), "Delta".into(), "Epsilon".into()],
    );
    list
}

fn row_labels(snapshot: &Snapshot<String, String>) -> Vec<String> {
    snapshot
        .rows()
        .map(|row| match row {
            PopupRow::GroupHeader { id, expanded } => format!("{id}/{expanded}"),
            PopupRow::Item { item, group } => match group {
                Some(group) => format!("{item}<{group}"),
                None => item.clone(),
            },
        })
        .collect()
}

/// A stand-in for the hosting popup view: it holds the rows it currently
/// displays and replays every published update against them.
struct MirrorView {
    updates: Arc<Mutex<Vec<PopupUpdate>>>,
    displayed: Snapshot<String, String>,
}

impl MirrorView {
    /// Connects to the source's update signal, starting from whatever the
    /// source currently displays.
    fn attach(source: &StringSource) -> Self {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let updates_clone = updates.clone();
        source.signals().popup_changed.connect(move |update| {
            updates_clone.lock().push(update.clone());
        });
        Self {
            updates,
            displayed: source.snapshot().clone(),
        }
    }

    /// Replays pending updates; the data source's current snapshot stands
    /// in for the cell re-queries a real view would issue.
    fn sync(&mut self, source: &StringSource) {
        for update in self.updates.lock().drain(..) {
            self.displayed = match update {
                PopupUpdate::Reload => source.snapshot().clone(),
                PopupUpdate::Patch(patch) => patch.apply(&self.displayed, source.snapshot()),
            };
        }
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn scenario_collapsed_projection() {
    let mut source = diffable_source();
    source.set_contents(sample_contents());

    assert_eq!(source.number_of_sections(), 3);
    assert_eq!(source.snapshot().total_row_count(), 3);
    assert_eq!(
        row_labels(source.snapshot()),
        vec!["Alpha", "Beta/false", "Gamma/false"]
    );
}

#[test]
fn scenario_expanding_a_group_patches_minimally() {
    let mut source = diffable_source();
    source.set_contents(sample_contents());

    let mut view = MirrorView::attach(&source);
    view.sync(&source);

    source.toggle_group(&"Beta".to_string());

    assert_eq!(
        row_labels(source.snapshot()),
        vec![
            "Alpha",
            "Beta/true",
            "Lambda<Beta",
            "Kappa<Beta",
            "Gamma/false"
        ]
    );

    // The published update must be exactly "insert the two children after
    // Beta's header, reload the header" - not a full reload.
    {
        let updates = view.updates.lock();
        assert_eq!(updates.len(), 1);
        let PopupUpdate::Patch(patch) = &updates[0] else {
            panic!("snapshot strategy must not fall back to a reload");
        };
        assert_eq!(
            patch.inserted_rows,
            vec![RowLocation::new(1, 1), RowLocation::new(1, 2)]
        );
        assert_eq!(patch.reloaded_rows, vec![RowLocation::new(1, 0)]);
        assert!(patch.removed_rows.is_empty());
        assert!(patch.inserted_sections.is_empty());
        assert!(patch.removed_sections.is_empty());
    }

    view.sync(&source);
    assert_eq!(view.displayed, *source.snapshot());
}

#[test]
fn scenario_selection_commit_and_redundant_reselect() {
    let mut source = diffable_source();
    source.set_contents(sample_contents());

    let notifications = Arc::new(Mutex::new(0));
    let notifications_clone = notifications.clone();
    source.signals().selection_changed.connect(move |_| {
        *notifications_clone.lock() += 1;
    });

    let mut combo = ComboBox::new(source);
    combo.show_popup();
    combo.activate_row(RowLocation::new(1, 0)); // expand Beta
    assert!(combo.is_popup_visible());

    // Kappa sits at section 1, row 2 while Beta is expanded.
    assert_eq!(
        combo.activate_row(RowLocation::new(1, 2)),
        Activation::Selected
    );
    assert!(!combo.is_popup_visible());
    assert_eq!(
        combo.data_source().selected_item(),
        Some(&"Kappa".to_string())
    );
    assert_eq!(combo.selection_cell(), "Kappa");
    assert_eq!(*notifications.lock(), 1);

    // Reopen and activate the still-selected item: a pure dismiss.
    combo.show_popup();
    assert_eq!(
        combo.activate_row(RowLocation::new(1, 2)),
        Activation::Dismissed
    );
    assert!(!combo.is_popup_visible());
    assert_eq!(*notifications.lock(), 1);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn toggle_round_trip_restores_the_exact_row_sequence() {
    let mut source = diffable_source();
    source.set_contents(sample_contents());
    let before = source.snapshot().clone();

    source.set_group_expanded(&"Gamma".to_string(), true);
    source.set_group_expanded(&"Gamma".to_string(), false);

    let after = source.snapshot();
    assert_eq!(*after, before);
    assert_eq!(before.total_row_count(), after.total_row_count());
    assert!(
        before
            .rows()
            .zip(after.rows())
            .all(|(a, b)| a.same_display(b))
    );
}

#[test]
fn noop_toggle_produces_no_patch_and_no_notifications() {
    let mut source = diffable_source();
    source.set_contents(sample_contents());
    source.set_group_expanded(&"Beta".to_string(), true);

    let view = MirrorView::attach(&source);
    let sizes = Arc::new(Mutex::new(0));
    let sizes_clone = sizes.clone();
    source.signals().size_changed.connect(move |_| {
        *sizes_clone.lock() += 1;
    });

    source.set_group_expanded(&"Beta".to_string(), true);
    source.set_contents(sample_contents()); // structurally identical

    assert!(view.updates.lock().is_empty());
    assert_eq!(*sizes.lock(), 0);
}

#[test]
fn diffing_a_projection_against_itself_is_empty() {
    let mut expansion = ExpansionState::new();
    expansion.set_expanded(&"Beta".to_string(), true);
    let snapshot = Snapshot::project(&sample_contents(), &expansion);

    // Headers carry an `expanded` field, but identity ignores it: the
    // self-diff contains no operations at all.
    let patch = diff_snapshots(&snapshot, &snapshot.clone());
    assert!(patch.is_empty());
}

#[test]
fn emptying_the_content_removes_every_row() {
    let mut source = diffable_source();
    source.set_contents(sample_contents());
    source.set_group_expanded(&"Beta".to_string(), true);

    let mut view = MirrorView::attach(&source);
    view.sync(&source);

    source.set_contents(NestedList::new());
    view.sync(&source);

    assert!(source.snapshot().is_empty());
    assert!(view.displayed.is_empty());
}

#[test]
fn mirror_view_tracks_an_arbitrary_edit_sequence() {
    let mut source = diffable_source();
    let mut view = MirrorView::attach(&source);

    source.set_contents(sample_contents());
    view.sync(&source);
    assert_eq!(view.displayed, *source.snapshot());

    source.toggle_group(&"Beta".to_string());
    view.sync(&source);
    source.toggle_group(&"Gamma".to_string());
    view.sync(&source);
    assert_eq!(view.displayed, *source.snapshot());

    // Replace content while two groups are open: Beta disappears, a new
    // group and a trailing item arrive.
    let mut replacement: NestedList<String, String> = NestedList::new();
    replacement.push_group(
        "Gamma".into(),
        vec!["Omega".into(), "Delta".into(), "Epsilon".into()],
    );
    replacement.push_group("Zeta".into(), vec!["Chi".into()]);
    replacement.push_item("Sigma".into());
    source.set_contents(replacement);
    view.sync(&source);
    assert_eq!(view.displayed, *source.snapshot());

    source.toggle_group(&"Zeta".to_string());
    view.sync(&source);
    source.toggle_group(&"Gamma".to_string());
    view.sync(&source);
    assert_eq!(view.displayed, *source.snapshot());
}

#[test]
fn strategies_stay_behaviorally_equivalent_across_a_session() {
    let run = |strategy: DiffStrategy| {
        let mut source = AdaptiveExpandableDataSource::new(
            strategy,
            selection_provider,
            header_provider,
            item_provider,
        );

        source.set_contents(sample_contents());
        source.toggle_group(&"Beta".to_string());
        source.did_select_cell(RowLocation::new(1, 1));
        source.toggle_group(&"Beta".to_string());
        source.toggle_group(&"Gamma".to_string());

        (
            row_labels(source.snapshot()),
            source.selected_item().cloned(),
            source.selection_cell(),
        )
    };

    assert_eq!(run(DiffStrategy::Snapshot), run(DiffStrategy::Manual));
}

#[test]
fn expansion_survives_content_replacement() {
    let mut source = diffable_source();
    source.set_contents(sample_contents());
    source.set_group_expanded(&"Beta".to_string(), true);

    // Beta vanishes...
    let mut without_beta: NestedList<String, String> = NestedList::new();
    without_beta.push_item("Alpha".into());
    source.set_contents(without_beta);
    assert_eq!(source.snapshot().total_row_count(), 1);

    // ...and returns still expanded.
    source.set_contents(sample_contents());
    assert_eq!(
        row_labels(source.snapshot()),
        vec![
            "Alpha",
            "Beta/true",
            "Lambda<Beta",
            "Kappa<Beta",
            "Gamma/false"
        ]
    );
}
