use indexmap::IndexSet;

/// Facet field used for eligibility filtering
pub const DEFAULT_FACET_FIELD: &str = "eligibilities";

/// Escape a facet value for use inside a single-quoted filter literal
///
/// Backslashes are doubled first so a trailing `\` cannot swallow the
/// closing quote, then every `'` becomes `\'`.
pub fn escape_facet_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Builds filter-query strings in the search index's filter syntax
///
/// Output has the shape
/// `<page filter> AND (<field>:'a' OR <field>:'b')`, with each part
/// omitted when it has nothing to contribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBuilder {
    field: String,
    dedupe: bool,
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FACET_FIELD)
    }
}

impl FilterBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dedupe: false,
        }
    }

    /// Collapse repeated facet values to their first occurrence
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Format a single `field:'value'` equality clause
    pub fn facet_clause(&self, value: &str) -> String {
        format!("{}:'{}'", self.field, escape_facet_value(value))
    }

    /// OR-group for the selected values, or `None` when nothing is selected
    ///
    /// A single value is emitted bare; two or more are parenthesized so the
    /// group binds tighter than the surrounding `AND`.
    pub fn facet_group<I, S>(&self, values: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let clauses: Vec<String> = if self.dedupe {
            values
                .into_iter()
                .map(|v| v.as_ref().to_string())
                .collect::<IndexSet<String>>()
                .iter()
                .map(|v| self.facet_clause(v))
                .collect()
        } else {
            values
                .into_iter()
                .map(|v| self.facet_clause(v.as_ref()))
                .collect()
        };

        match clauses.len() {
            0 => None,
            1 => clauses.into_iter().next(),
            _ => Some(format!("({})", clauses.join(" OR "))),
        }
    }

    /// Combine the page filter and the selected facet values
    ///
    /// # Arguments
    /// * `page_filter` - Pre-formed clause for the current listing, emitted verbatim
    /// * `values` - Selected facet values in the order they should appear
    ///
    /// # Returns
    /// The joined filter string, empty when neither input contributes.
    pub fn build<I, S>(&self, page_filter: Option<&str>, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut clauses: Vec<String> = Vec::with_capacity(2);

        if let Some(filter) = page_filter.filter(|f| !f.is_empty()) {
            clauses.push(filter.to_string());
        }

        if let Some(group) = self.facet_group(values) {
            clauses.push(group);
        }

        clauses.join(" AND ")
    }
}

/// Build the eligibility filter string with the default facet field
#[inline]
pub fn build_filter_string<I, S>(page_filter: Option<&str>, eligibilities: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FilterBuilder::default().build(page_filter, eligibilities)
}
