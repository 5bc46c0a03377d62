use std::{cmp::Ordering, fmt, str::FromStr};

use crate::api::Comment;

/// Column a listing can be ordered by
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SortField {
    Id,
    Name,
    Email,
    Body,
}

impl SortField {
    pub const ALL: [SortField; 4] = [SortField::Id, SortField::Name, SortField::Email, SortField::Body];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Body => "body",
        }
    }

    fn compare(&self, a: &Comment, b: &Comment) -> Ordering {
        match self {
            SortField::Id => a.id.0.cmp(&b.id.0),
            SortField::Name => cmp_text(&a.name, &b.name),
            SortField::Email => cmp_text(&a.email, &b.email),
            SortField::Body => cmp_text(&a.body, &b.body),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown sort field {0:?}, expected one of id, name, email, body")]
pub struct UnknownSortField(String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<SortField, UnknownSortField> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortField(String::from(s)))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Ordering applied on top of the search results
///
/// Text columns compare case-insensitively. The sort is stable: equal keys
/// keep their merged-view order, in both directions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn ascending(field: SortField) -> Sort {
        Sort {
            field,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Sort {
        Sort {
            field,
            order: SortOrder::Descending,
        }
    }

    pub fn apply(&self, comments: &mut [Comment]) {
        comments.sort_by(|a, b| match self.order {
            SortOrder::Ascending => self.field.compare(a, b),
            SortOrder::Descending => self.field.compare(b, a),
        });
    }

    /// What clicking the header of `field` leads to: ascending first, then
    /// descending, then back to the unsorted view
    pub fn cycle(current: Option<Sort>, field: SortField) -> Option<Sort> {
        match current {
            Some(s) if s.field == field => match s.order {
                SortOrder::Ascending => Some(Sort::descending(field)),
                SortOrder::Descending => None,
            },
            _ => Some(Sort::ascending(field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{comment, ids};

    fn named(id: u64, name: &str) -> Comment {
        let mut c = comment(id, "b");
        c.name = String::from(name);
        c
    }

    #[test]
    fn by_id() {
        let mut v = vec![comment(3, "x"), comment(501, "x"), comment(1, "x")];
        Sort::ascending(SortField::Id).apply(&mut v);
        assert_eq!(ids(&v), vec![1, 3, 501]);
        Sort::descending(SortField::Id).apply(&mut v);
        assert_eq!(ids(&v), vec![501, 3, 1]);
    }

    #[test]
    fn text_ignores_case_and_keeps_ties_in_place() {
        let original = vec![
            named(1, "bob"),
            named(2, "Alice"),
            named(3, "BOB"),
            named(4, "alice"),
        ];
        let mut v = original.clone();
        Sort::ascending(SortField::Name).apply(&mut v);
        assert_eq!(ids(&v), vec![2, 4, 1, 3]);

        let mut v = original;
        Sort::descending(SortField::Name).apply(&mut v);
        assert_eq!(ids(&v), vec![1, 3, 2, 4]);
    }

    #[test]
    fn by_email_and_body() {
        let mut a = comment(1, "zeta");
        a.email = String::from("b@example.org");
        let mut b = comment(2, "Alpha");
        b.email = String::from("a@example.org");

        let mut v = vec![a.clone(), b.clone()];
        Sort::ascending(SortField::Email).apply(&mut v);
        assert_eq!(ids(&v), vec![2, 1]);

        let mut v = vec![b, a];
        Sort::descending(SortField::Body).apply(&mut v);
        assert_eq!(ids(&v), vec![1, 2]);
    }

    #[test]
    fn header_clicks_cycle() {
        let asc = Sort::cycle(None, SortField::Email);
        assert_eq!(asc, Some(Sort::ascending(SortField::Email)));
        let desc = Sort::cycle(asc, SortField::Email);
        assert_eq!(desc, Some(Sort::descending(SortField::Email)));
        assert_eq!(Sort::cycle(desc, SortField::Email), None);
        assert_eq!(
            Sort::cycle(desc, SortField::Id),
            Some(Sort::ascending(SortField::Id))
        );
    }

    #[test]
    fn field_names() {
        assert_eq!("Name".parse::<SortField>(), Ok(SortField::Name));
        assert_eq!("body".parse::<SortField>(), Ok(SortField::Body));
        assert!("date".parse::<SortField>().is_err());
    }

    #[test]
    fn sorting_is_stable() {
        bolero::check!()
            .with_type::<(Vec<u8>, bool)>()
            .cloned()
            .for_each(|(names, descending)| {
                let v = names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| named(i as u64, ["a", "A", "b", "c"][*n as usize % 4]))
                    .collect::<Vec<_>>();
                let sort = match descending {
                    false => Sort::ascending(SortField::Name),
                    true => Sort::descending(SortField::Name),
                };
                let mut sorted = v.clone();
                sort.apply(&mut sorted);
                for w in sorted.windows(2) {
                    let ord = SortField::Name.compare(&w[0], &w[1]);
                    match ord {
                        // ties keep their original relative order
                        Ordering::Equal => assert!(w[0].id < w[1].id),
                        Ordering::Less => assert!(!descending),
                        Ordering::Greater => assert!(descending),
                    }
                }
                assert_eq!(sorted.len(), v.len());
            });
    }
}
