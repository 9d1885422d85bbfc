//! Detection of injected pseudo-messages in user events
//!
//! The chat tool records slash-command echoes, local command output and
//! interruption notices as `user` events. They are not part of the
//! conversation and are dropped from transcripts.

/// Substrings that mark a user event as tool-generated.
const SYSTEM_MARKERS: &[&str] = &[
    "Caveat: The messages below",
    "<command-name>",
    "<command-message>",
    "<local-command-",
    "[Request interrupted",
];

/// Short texts fully wrapped in angle brackets are treated as tags.
const MAX_TAG_ONLY_CHARS: usize = 100;

/// Whether user text was injected by the tool rather than typed by a person.
pub fn is_system_message(text: &str) -> bool {
    if SYSTEM_MARKERS.iter().any(|marker| text.contains(marker)) {
        return true;
    }

    let trimmed = text.trim();
    trimmed.starts_with('<') && trimmed.ends_with('>') && trimmed.chars().count() < MAX_TAG_ONLY_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_echo_is_system() {
        assert!(is_system_message("<command-name>foo</command-name>"));
        assert!(is_system_message(
            "<command-message>init is analyzing</command-message>\n<command-name>/init</command-name>"
        ));
        assert!(is_system_message("<local-command-stdout>ok</local-command-stdout>"));
    }

    #[test]
    fn banners_and_interruptions_are_system() {
        assert!(is_system_message(
            "Caveat: The messages below were generated by the user while running local commands."
        ));
        assert!(is_system_message("[Request interrupted by user for tool use]"));
    }

    #[test]
    fn short_tag_only_text_is_system() {
        assert!(is_system_message("  <system-reminder>x</system-reminder>\n"));
    }

    #[test]
    fn long_tag_wrapped_text_is_kept() {
        let long = format!("<note>{}</note>", "x".repeat(120));
        assert!(!is_system_message(&long));
    }

    #[test]
    fn ordinary_text_is_kept() {
        assert!(!is_system_message("please fix the <div> layout"));
        assert!(!is_system_message("hello"));
        assert!(!is_system_message(""));
    }
}
