//! Demo host page: a logo, two items with panels, one plain item and a link
//! outside the menu.

use crate::bootstrap;
use crate::document::Document;
use crate::error::MenuError;

/// Markup of the demo host page.
pub const DEMO_PAGE: &str = r#"
<div class="page">
    <div class="page__header">
        <div class="megamenu" data-megamenu>
            <div class="megamenu__item" data-megamenu-item>
                <a href="" class="page__logo">
                    <img src="logo.svg" alt="Logo">
                </a>
            </div>
            <div class="megamenu__item" data-megamenu-item>
                <a href="" class="megamenu__item-trigger" data-megamenu-trigger>Item one</a>
                <div class="megamenu__panel" data-megamenu-panel>
                    <ul>
                        <li><a href="" class="megamenu__link">Panel link</a></li>
                        <li><a href="" class="megamenu__link">Panel link</a></li>
                        <li><a href="" class="megamenu__link">Panel link</a></li>
                    </ul>
                </div>
            </div>
            <div class="megamenu__item" data-megamenu-item>
                <a href="" class="megamenu__item-trigger" data-megamenu-trigger>Item two</a>
                <div class="megamenu__panel" data-megamenu-panel>
                    <ul>
                        <li><a href="" class="megamenu__link">Panel link</a></li>
                        <li><a href="" class="megamenu__link">Panel link</a></li>
                        <li><a href="" class="megamenu__link">Panel link</a></li>
                    </ul>
                </div>
            </div>
            <div class="megamenu__item" data-megamenu-item>
                <a href="">Item three</a>
            </div>
        </div>
    </div>
    <div class="page__content">
        <a href="">Link outside menu</a>
    </div>
</div>
"#;

/// Options the demo page boots with. `megamenuClass` is not a recognized key,
/// so the defaults apply.
pub const DEMO_OPTIONS: &str = r#"{"megamenuClass": "test-class"}"#;

/// Parse [`DEMO_PAGE`] and mount its menu with [`DEMO_OPTIONS`].
pub fn demo_document() -> Result<Document, MenuError> {
    let mut document = Document::parse(DEMO_PAGE)?;
    bootstrap::init_all_json(&mut document, DEMO_OPTIONS)?;
    Ok(document)
}
