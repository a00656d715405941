//! ID and filename sanitization.

/// Diagram-node IDs: space, dot, dash, and parentheses become underscores.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| if matches!(c, ' ' | '.' | '-' | '(' | ')') { '_' } else { c })
        .collect()
}

/// Display titles sanitized for use as a filename: path-illegal characters
/// become underscores.
pub fn sanitize_title(raw: &str) -> String {
    raw.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_diagram_ids() {
        assert_eq!(sanitize_id("App.Web.Order Controller (v2)"), "App_Web_Order_Controller__v2_");
    }

    #[test]
    fn sanitizes_filesystem_titles() {
        assert_eq!(sanitize_title("Report: Q1/Q2"), "Report_ Q1_Q2");
    }
}
