//! Mount a controller on every menu root of a document.

use crate::config::MenuOptions;
use crate::document::Document;
use crate::error::MenuError;
use crate::menu::controller::MenuHandle;
use crate::menu::model::{MenuModel, ROOT_ATTR};

/// Find every `[data-megamenu]` element in document order and mount one
/// controller per root, each with its own copy of `options`.
///
/// All roots are validated before any is wired: on error the document is left
/// untouched.
pub fn init_all(document: &mut Document, options: MenuOptions) -> Result<Vec<MenuHandle>, MenuError> {
    let roots = document
        .dom()
        .query_by_attr(document.document_node(), ROOT_ATTR);
    let models = roots
        .iter()
        .map(|&root| MenuModel::build(document.dom(), root))
        .collect::<Result<Vec<_>, _>>()?;

    let handles: Vec<MenuHandle> = models
        .into_iter()
        .map(|model| document.install(model, options.clone()))
        .collect();

    tracing::info!(
        menus = handles.len(),
        menu_class = %options.menu_class,
        "mega menus initialized"
    );
    Ok(handles)
}

/// [`init_all`] with options merged from a JSON object.
pub fn init_all_json(document: &mut Document, options: &str) -> Result<Vec<MenuHandle>, MenuError> {
    init_all(document, MenuOptions::from_json(options)?)
}
