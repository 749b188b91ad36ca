//! Shared UI icons and emojis.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");
pub static INBOX: Emoji<'_, '_> = Emoji("📥 ", "-");

// Order card fields
pub static PERSON: Emoji<'_, '_> = Emoji("👤 ", "");
pub static PHONE: Emoji<'_, '_> = Emoji("📞 ", "tel:");
pub static PIN: Emoji<'_, '_> = Emoji("📍 ", "@");
pub static CLOCK: Emoji<'_, '_> = Emoji("⏱️  ", "[T]");
pub static LOCK: Emoji<'_, '_> = Emoji("🔒 ", "");
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "->");
