//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for paste/submit shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Paste shortcut display
/// - macOS: "Cmd+V"
/// - Linux/Windows: "Ctrl+V"
#[cfg(target_os = "macos")]
pub const PASTE_SHORTCUT: &str = "Cmd+V";

#[cfg(not(target_os = "macos"))]
pub const PASTE_SHORTCUT: &str = "Ctrl+V";
