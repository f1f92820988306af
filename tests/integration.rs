//! Integration tests for megamenu.
//!
//! These tests drive menus through the public API with the [`Pilot`], the
//! way a user would: focusing, clicking and pressing keys, then checking the
//! ARIA attributes, state classes and focus that result.

use megamenu::event::{EventType, Key, Modifiers, Scope};
use megamenu::testing::{menu_summary, Pilot};
use megamenu::MenuOptions;
use pretty_assertions::assert_eq;

/// Four items: two panels, a plain item, then a third panel.
const MENU_PAGE: &str = r#"
<header>
    <nav class="megamenu" data-megamenu>
        <div class="megamenu__item" data-megamenu-item>
            <a href="" class="megamenu__item-trigger" data-megamenu-trigger>Item one</a>
            <div class="megamenu__panel" data-megamenu-panel>
                <ul>
                    <li><a href="">One A</a></li>
                    <li><a href="">One B</a></li>
                    <li><a href="">One C</a></li>
                </ul>
            </div>
        </div>
        <div class="megamenu__item" data-megamenu-item>
            <a href="" class="megamenu__item-trigger" data-megamenu-trigger>Item two</a>
            <div class="megamenu__panel" data-megamenu-panel>
                <ul>
                    <li><a href="">Two A</a></li>
                    <li><a href="">Two B</a></li>
                    <li><a href="">Two C</a></li>
                </ul>
            </div>
        </div>
        <div class="megamenu__item" data-megamenu-item>
            <a href="">Item three</a>
        </div>
        <div class="megamenu__item" data-megamenu-item>
            <a href="" class="megamenu__item-trigger" data-megamenu-trigger>Item four</a>
            <div class="megamenu__panel" data-megamenu-panel>
                <ul>
                    <li><a href="">Four A</a></li>
                    <li><a href="">Four B</a></li>
                    <li><a href="">Four C</a></li>
                </ul>
            </div>
        </div>
    </nav>
</header>
<main>
    <p>Body copy</p>
    <a href="">Outside</a>
</main>
"#;

fn pilot() -> Pilot {
    Pilot::new(MENU_PAGE).expect("page parses and mounts")
}

/// At most one panel is marked active, and the menu is open iff one is.
fn assert_single_active_panel(pilot: &Pilot) {
    let menu = pilot.menu();
    let active_class = menu.options().panel_active_class();
    let active: Vec<usize> = menu
        .model()
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            item.panel
                .as_ref()
                .is_some_and(|panel| pilot.has_class(panel.node, &active_class))
        })
        .map(|(index, _)| index)
        .collect();
    assert!(active.len() <= 1, "several active panels: {active:?}");
    assert_eq!(menu.opened(), active.len() == 1);
    assert_eq!(menu.active_panel(), active.first().copied());
    assert_eq!(
        pilot.has_class(menu.root(), &menu.options().root_active_class()),
        menu.opened()
    );
}

fn outside_click_listeners(pilot: &Pilot) -> usize {
    pilot
        .document()
        .listener_count(Scope::Document, EventType::Click)
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

#[test]
fn roles_after_init() {
    let pilot = pilot();
    let menu = pilot.menu();
    assert_eq!(pilot.attr(menu.root(), "role").as_deref(), Some("menubar"));
    let menuitems = menu
        .model()
        .items()
        .iter()
        .filter(|item| pilot.attr(item.trigger, "role").as_deref() == Some("menuitem"))
        .count();
    assert_eq!(menuitems, 4);
}

#[test]
fn panels_start_hidden_and_linked() {
    let pilot = pilot();
    for item in pilot.menu().model().items() {
        let Some(panel) = &item.panel else {
            assert_eq!(pilot.attr(item.trigger, "aria-haspopup"), None);
            continue;
        };
        let trigger_id = pilot.attr(item.trigger, "id").unwrap();
        let panel_id = pilot.attr(panel.node, "id").unwrap();
        assert_eq!(pilot.attr(item.trigger, "aria-haspopup").as_deref(), Some("true"));
        assert_eq!(pilot.attr(item.trigger, "aria-expanded").as_deref(), Some("false"));
        assert_eq!(pilot.attr(item.trigger, "aria-controls"), Some(panel_id));
        assert_eq!(pilot.attr(panel.node, "aria-labelledby"), Some(trigger_id));
        assert_eq!(pilot.attr(panel.node, "aria-hidden").as_deref(), Some("true"));
        assert_eq!(pilot.attr(panel.node, "role").as_deref(), Some("menu"));
        for &link in &panel.links {
            assert_eq!(pilot.attr(link, "tabindex").as_deref(), Some("-1"));
        }
    }
    assert_single_active_panel(&pilot);
}

#[test]
fn initial_markup_snapshot() {
    let pilot = Pilot::new(
        r#"<nav class="megamenu" data-megamenu>
            <div class="megamenu__item" data-megamenu-item>
                <a href="" class="megamenu__item-trigger" data-megamenu-trigger>Products</a>
                <div class="megamenu__panel" data-megamenu-panel>
                    <ul><li><a href="">Laptops</a></li></ul>
                </div>
            </div>
            <div class="megamenu__item" data-megamenu-item><a href="">About</a></div>
        </nav>"#,
    )
    .unwrap();
    insta::assert_snapshot!(pilot.menu_markup(), @r#"
    <nav class="megamenu" data-megamenu="" role="menubar">
      <div class="megamenu__item" data-megamenu-item="">
        <a class="megamenu__item-trigger" href="" data-megamenu-trigger="" aria-haspopup="true" aria-controls="megamenu-control-0001" id="megamenu-label-0001" aria-expanded="false" role="menuitem">Products</a>
        <div class="megamenu__panel" data-megamenu-panel="" aria-labelledby="megamenu-label-0001" aria-hidden="true" id="megamenu-control-0001" aria-label="Products" role="menu">
          <ul>
            <li>
              <a href="" tabindex="-1">Laptops</a>
            </li>
          </ul>
        </div>
      </div>
      <div class="megamenu__item" data-megamenu-item="">
        <a href="" role="menuitem">About</a>
      </div>
    </nav>
    "#);
}

#[test]
fn custom_options_rename_classes_and_ids() {
    let options = MenuOptions::new()
        .with_menu_class("site-nav")
        .with_active_modifier("-open");
    let mut pilot = Pilot::with_options(MENU_PAGE, options).unwrap();
    let trigger = pilot.find_text("Item one");
    assert_eq!(pilot.attr(trigger, "id").as_deref(), Some("site-nav-label-0001"));

    pilot.click_text("Item one");
    let root = pilot.menu().root();
    assert!(pilot.has_class(root, "site-nav-open"));
    assert!(pilot.has_class(trigger, "megamenu__item-trigger-open"));
}

// ---------------------------------------------------------------------------
// Pointer
// ---------------------------------------------------------------------------

#[test]
fn click_trigger_toggles_panel() {
    let mut pilot = pilot();
    let event = pilot.click_text("Item one");
    assert!(event.default_prevented());
    assert_eq!(pilot.menu().active_panel(), Some(0));
    let trigger = pilot.find_text("Item one");
    assert_eq!(pilot.attr(trigger, "aria-expanded").as_deref(), Some("true"));
    assert_single_active_panel(&pilot);

    pilot.click_text("Item one");
    assert!(!pilot.menu().opened());
    assert_eq!(pilot.attr(trigger, "aria-expanded").as_deref(), Some("false"));
    assert_single_active_panel(&pilot);
}

#[test]
fn click_other_trigger_switches_panel() {
    let mut pilot = pilot();
    pilot.click_text("Item one");
    pilot.click_text("Item four");
    assert_eq!(pilot.menu().active_panel(), Some(3));
    assert_eq!(outside_click_listeners(&pilot), 1);
    assert_single_active_panel(&pilot);
}

#[test]
fn click_plain_item_keeps_navigation() {
    let mut pilot = pilot();
    let event = pilot.click_text("Item three");
    assert!(!event.default_prevented());
    assert!(!pilot.menu().opened());
}

#[test]
fn outside_click_closes() {
    let mut pilot = pilot();
    assert_eq!(outside_click_listeners(&pilot), 0);
    pilot.click_text("Item two");
    assert!(pilot.menu().opened());
    assert_eq!(outside_click_listeners(&pilot), 1);

    pilot.click_text("Outside");
    assert!(!pilot.menu().opened());
    assert_eq!(outside_click_listeners(&pilot), 0);
    assert_single_active_panel(&pilot);
}

#[test]
fn click_on_non_focusable_outside_node_closes() {
    let mut pilot = pilot();
    pilot.click_text("Item two");
    let body_copy = pilot
        .document()
        .dom()
        .query_all(pilot.document().document_node(), |data| data.tag == "p")[0];
    pilot.click(body_copy);
    assert!(!pilot.menu().opened());
}

#[test]
fn click_inside_panel_keeps_it_open() {
    let mut pilot = pilot();
    pilot.click_text("Item one");
    let event = pilot.click_text("One B");
    assert!(!event.default_prevented());
    assert_eq!(pilot.menu().active_panel(), Some(0));
    assert_eq!(pilot.focused_text().as_deref(), Some("One B"));
}

#[test]
fn repeated_open_close_does_not_leak_listeners() {
    let mut pilot = pilot();
    let baseline = pilot.document().listener_count(Scope::Document, EventType::Click);
    for _ in 0..5 {
        pilot.click_text("Item one");
        pilot.click_text("Outside");
    }
    assert_eq!(outside_click_listeners(&pilot), baseline);
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[test]
fn focus_marker_follows_focus() {
    let mut pilot = pilot();
    let focused = pilot.menu().options().trigger_focused_class();
    let one = pilot.find_text("Item one");
    let two = pilot.find_text("Item two");

    pilot.focus_text("Item one");
    assert!(pilot.has_class(one, &focused));

    pilot.focus_text("Item two");
    assert!(!pilot.has_class(one, &focused));
    assert!(pilot.has_class(two, &focused));

    pilot.document_mut().blur();
    assert!(!pilot.has_class(two, &focused));
}

#[test]
fn tab_skips_links_of_hidden_panels() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    let event = pilot.press_key(Key::Tab);
    assert!(!event.default_prevented());
    assert_eq!(pilot.focused_text().as_deref(), Some("Item two"));
}

#[test]
fn tab_enters_open_panel() {
    let mut pilot = pilot();
    pilot.click_text("Item one");
    pilot.press_key(Key::Tab);
    assert_eq!(pilot.focused_text().as_deref(), Some("One A"));

    pilot.press_key_with(Key::Tab, Modifiers::SHIFT);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item one"));
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

#[test]
fn down_walks_through_panels() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");

    let event = pilot.press_key(Key::Down);
    assert!(event.default_prevented());
    assert_eq!(pilot.menu().active_panel(), Some(0));
    assert_eq!(pilot.focused_text().as_deref(), Some("One A"));

    pilot.press_key(Key::Down);
    assert_eq!(pilot.focused_text().as_deref(), Some("One B"));
    pilot.press_key(Key::Down);
    assert_eq!(pilot.focused_text().as_deref(), Some("One C"));

    pilot.press_key(Key::Down);
    assert_eq!(pilot.menu().active_panel(), Some(1));
    assert_eq!(pilot.focused_text().as_deref(), Some("Two A"));
    assert_single_active_panel(&pilot);
}

#[test]
fn down_past_last_link_into_plain_item_closes() {
    let mut pilot = pilot();
    pilot.focus_text("Item two");
    pilot.press_keys(&[Key::Down, Key::Down, Key::Down]);
    assert_eq!(pilot.focused_text().as_deref(), Some("Two C"));

    pilot.press_key(Key::Down);
    assert!(!pilot.menu().opened());
    assert_eq!(pilot.focused_text().as_deref(), Some("Item three"));
    assert_eq!(outside_click_listeners(&pilot), 0);
    assert_single_active_panel(&pilot);
}

#[test]
fn down_on_plain_trigger_moves_to_next_item() {
    let mut pilot = pilot();
    pilot.focus_text("Item three");
    pilot.press_key(Key::Down);
    assert_eq!(pilot.menu().active_panel(), Some(3));
    assert_eq!(pilot.focused_text().as_deref(), Some("Four A"));
}

#[test]
fn down_past_end_of_menu_is_noop() {
    let mut pilot = pilot();
    pilot.focus_text("Item four");
    pilot.press_keys(&[Key::Down, Key::Down, Key::Down]);
    assert_eq!(pilot.focused_text().as_deref(), Some("Four C"));

    let event = pilot.press_key(Key::Down);
    assert!(!event.default_prevented());
    assert_eq!(pilot.focused_text().as_deref(), Some("Four C"));
    assert_eq!(pilot.menu().active_panel(), Some(3));
}

#[test]
fn up_walks_back_to_trigger() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    pilot.press_keys(&[Key::Down, Key::Down]);
    assert_eq!(pilot.focused_text().as_deref(), Some("One B"));

    pilot.press_key(Key::Up);
    assert_eq!(pilot.focused_text().as_deref(), Some("One A"));
    pilot.press_key(Key::Up);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item one"));
    assert_eq!(pilot.menu().active_panel(), Some(0));

    pilot.press_key(Key::Up);
    assert!(!pilot.menu().opened());
    assert_eq!(pilot.focused_text().as_deref(), Some("Item one"));
}

#[test]
fn up_on_first_trigger_while_closed_is_noop() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    let event = pilot.press_key(Key::Up);
    assert!(!event.default_prevented());
    assert!(!pilot.menu().opened());
}

#[test]
fn up_from_trigger_enters_previous_panel_at_its_end() {
    let mut pilot = pilot();
    pilot.focus_text("Item two");
    pilot.press_key(Key::Up);
    assert_eq!(pilot.menu().active_panel(), Some(0));
    assert_eq!(pilot.focused_text().as_deref(), Some("One C"));
}

#[test]
fn up_into_plain_item_closes() {
    let mut pilot = pilot();
    pilot.click_text("Item four");
    pilot.press_key(Key::Up);
    assert!(!pilot.menu().opened());
    assert_eq!(pilot.focused_text().as_deref(), Some("Item three"));
}

#[test]
fn right_and_left_move_between_triggers() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    pilot.press_key(Key::Right);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item two"));
    assert!(!pilot.menu().opened());

    pilot.press_key(Key::Left);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item one"));

    let event = pilot.press_key(Key::Left);
    assert!(!event.default_prevented());
    assert_eq!(pilot.focused_text().as_deref(), Some("Item one"));
}

#[test]
fn right_on_last_trigger_is_noop() {
    let mut pilot = pilot();
    pilot.focus_text("Item four");
    let event = pilot.press_key(Key::Right);
    assert!(!event.default_prevented());
    assert_eq!(pilot.focused_text().as_deref(), Some("Item four"));
}

#[test]
fn sideways_while_open_follows_panels() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    pilot.press_key(Key::Down);
    assert_eq!(pilot.focused_text().as_deref(), Some("One A"));

    pilot.press_key(Key::Right);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item two"));
    assert_eq!(pilot.menu().active_panel(), Some(1));

    pilot.press_key(Key::Right);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item three"));
    assert!(!pilot.menu().opened());

    // Closed now, so moving on does not reopen anything.
    pilot.press_key(Key::Right);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item four"));
    assert!(!pilot.menu().opened());
    assert_single_active_panel(&pilot);
}

#[test]
fn escape_closes_and_restores_focus() {
    let mut pilot = pilot();
    pilot.focus_text("Item two");
    pilot.press_keys(&[Key::Down, Key::Down]);
    assert_eq!(pilot.focused_text().as_deref(), Some("Two B"));

    let event = pilot.press_key(Key::Escape);
    assert!(event.default_prevented());
    assert!(!pilot.menu().opened());
    assert_eq!(pilot.focused_text().as_deref(), Some("Item two"));

    let event = pilot.press_key(Key::Escape);
    assert!(!event.default_prevented());
}

#[test]
fn terminal_press_and_release_move_once() {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    let mut pilot = pilot();
    pilot.focus_text("Item one");
    for kind in [KeyEventKind::Press, KeyEventKind::Release] {
        pilot
            .document_mut()
            .terminal_key(KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, kind));
    }
    assert_eq!(pilot.focused_text().as_deref(), Some("One A"));
    assert_eq!(pilot.menu().active_panel(), Some(0));
}

#[test]
fn reserved_keys_are_left_alone() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    for key in [Key::Enter, Key::Char(' '), Key::Home, Key::Char('x')] {
        let event = pilot.press_key(key);
        assert!(!event.default_prevented(), "{key:?} was consumed");
    }
    assert!(!pilot.menu().opened());
}

#[test]
fn keys_outside_the_menu_are_ignored() {
    let mut pilot = pilot();
    pilot.click_text("Item one");
    pilot.focus_text("Outside");
    let event = pilot.press_key(Key::Escape);
    assert!(!event.default_prevented());
    assert!(pilot.menu().opened());
}

#[test]
fn state_stays_consistent_over_a_long_session() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    let keys = [
        Key::Down,
        Key::Right,
        Key::Down,
        Key::Down,
        Key::Down,
        Key::Down,
        Key::Up,
        Key::Left,
        Key::Escape,
        Key::Right,
        Key::Right,
        Key::Down,
        Key::Up,
        Key::Up,
        Key::Left,
        Key::Left,
        Key::Up,
    ];
    for key in keys {
        pilot.press_key(key);
        assert_single_active_panel(&pilot);
        assert!(outside_click_listeners(&pilot) <= 1);
    }
}

#[test]
fn summary_after_keyboard_session() {
    let mut pilot = pilot();
    pilot.focus_text("Item one");
    pilot.press_keys(&[Key::Down, Key::Right]);
    let handle = pilot.handles()[0];
    insta::assert_snapshot!(menu_summary(pilot.document(), handle), @r"
    state: open 1
    focus: Item two
    0 Item one expanded=false hidden=true
    1 Item two expanded=true hidden=false
    2 Item three -
    3 Item four expanded=false hidden=true
    ");
}

// ---------------------------------------------------------------------------
// Several menus
// ---------------------------------------------------------------------------

#[test]
fn opening_one_menu_closes_another() {
    let mut pilot = Pilot::new(
        r#"<nav data-megamenu>
            <div data-megamenu-item>
                <a href="" data-megamenu-trigger>Top</a>
                <div data-megamenu-panel><a href="">Top link</a></div>
            </div>
        </nav>
        <nav data-megamenu>
            <div data-megamenu-item>
                <a href="" data-megamenu-trigger>Bottom</a>
                <div data-megamenu-panel><a href="">Bottom link</a></div>
            </div>
        </nav>"#,
    )
    .unwrap();
    let [top, bottom] = [pilot.handles()[0], pilot.handles()[1]];

    pilot.click_text("Top");
    assert!(pilot.document().menu(top).unwrap().opened());

    pilot.click_text("Bottom");
    assert!(!pilot.document().menu(top).unwrap().opened());
    assert!(pilot.document().menu(bottom).unwrap().opened());
    assert_eq!(outside_click_listeners(&pilot), 1);
}

#[test]
fn demo_page_keyboard_from_logo() {
    let mut pilot = Pilot::new(megamenu::page::DEMO_PAGE).unwrap();
    let logo = pilot.menu().model().items()[0].trigger;
    pilot.document_mut().focus(logo);
    pilot.press_key(Key::Right);
    assert_eq!(pilot.focused_text().as_deref(), Some("Item one"));
    pilot.press_key(Key::Down);
    assert_eq!(pilot.menu().active_panel(), Some(1));
    assert_eq!(pilot.focused_text().as_deref(), Some("Panel link"));
}
