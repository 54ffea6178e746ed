//! The catalog of command actions a script may use.
//!
//! The catalog is fixed and sorted; the editor offers it as a closed choice,
//! while the text codec only uses it to flag unknown actions.

use std::collections::BTreeSet;
use std::sync::OnceLock;

const AVAILABLE_COMMANDS: &[&str] = &[
    "open",
    "click",
    "clickAndWait",
    "select",
    "selectAndWait",
    "type",
    "pause",
    "waitForPageToLoad",
    "selectFrame",
    "assertAlert",
    "assertConfirmation",
    "assertPrompt",
    "answerOnNextPrompt",
    "store",
    "storeText",
    "storeTitle",
    "storeAttribute",
    "assertText",
    "assertTitle",
    "clickAt",
    "echo",
    "mouseOver",
    "storeEval",
    "verifyText",
    "verifyTitle",
    "sendKeys",
    "dragAndDropToObject",
    "selectWindow",
    "captureScreenshot",
    "refresh",
    "verifyElementPresent",
    "assertElementPresent",
    "deleteAllCookies",
    "label",
    "gotoLabel",
    "gotoIf",
    "while",
    "endWhile",
    "csvRead",
    "csvSave",
    "if",
    "else",
    "endif",
    "storeValue",
    "assertValue",
    "verifyValue",
    "captureEntirePageScreenshot",
    "assertEqual",
    "assertNotEqual",
    "assertTrue",
    "assertChecked",
    "assertSelectedValue",
    "containsString",
    "checkIfPersian",
    "checkLength",
    "greaterThan",
    "lessThan",
];

/// Returns the permitted action names, sorted lexicographically and without duplicates.
pub fn available_commands() -> &'static [&'static str] {
    static SORTED: OnceLock<Vec<&'static str>> = OnceLock::new();

    SORTED.get_or_init(|| {
        let unique: BTreeSet<&'static str> = AVAILABLE_COMMANDS.iter().copied().collect();
        unique.into_iter().collect()
    })
}

/// Whether `action` is one of the catalogued actions.
pub fn is_known(action: &str) -> bool {
    available_commands().binary_search(&action).is_ok()
}

/// Catalog entries whose name starts with `input`, ignoring case.
///
/// Mirrors the prefix filter of the action picker.
pub fn matching(input: &str) -> Vec<&'static str> {
    let needle = input.to_lowercase();
    available_commands()
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().starts_with(&needle))
        .collect()
}
