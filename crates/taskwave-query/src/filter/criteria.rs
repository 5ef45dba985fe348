//! Filter criteria: the full description of a task view.
//!
//! Every selector is an explicit enum with an "any" variant instead of a magic
//! string, but all of them read and write the same strings the front end uses
//! (`"all"`, `"dueDate"`, `"unassigned"`, ...) so stored criteria stay portable.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{FilterError, FilterResult};
use crate::models::Priority;

/// Wire value meaning "no constraint" for every selector.
const ANY: &str = "all";

/// Wire value selecting tasks with no assignee.
const UNASSIGNED: &str = "unassigned";

/// Lower-cases and strips `-`/`_` so `due-date`, `due_date` and `dueDate` compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Implements `as_str`, `Display`, `FromStr` and string serde for a fieldless enum.
macro_rules! wire_enum {
    ($name:ident, $field:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = normalize(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize(v.as_str()) == key)
                    .ok_or_else(|| FilterError::invalid_value($field, s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(D::Error::custom)
            }
        }
    };
}

/// Completion-state selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    /// Pending with a due date strictly in the past.
    Overdue,
}

wire_enum!(StatusFilter, "status" {
    All => "all",
    Pending => "pending",
    Completed => "completed",
    Overdue => "overdue",
});

/// Which task timestamp a [`DateRange`] applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateField {
    #[default]
    DueDate,
    CreatedAt,
    CompletedAt,
}

wire_enum!(DateField, "date field" {
    DueDate => "dueDate",
    CreatedAt => "createdAt",
    CompletedAt => "completedAt",
});

/// Sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    CreatedAt,
    DueDate,
    Title,
    Priority,
    /// Raw category id, not the resolved name.
    Category,
}

wire_enum!(SortKey, "sort key" {
    CreatedAt => "createdAt",
    DueDate => "dueDate",
    Title => "title",
    Priority => "priority",
    Category => "category",
});

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

wire_enum!(SortOrder, "sort order" {
    Asc => "asc",
    Desc => "desc",
});

/// Grouping key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// No grouping; the result is a flat list.
    #[default]
    None,
    Category,
    Priority,
    Status,
    Assignee,
    /// Everything in a single "All Tasks" group.
    Single,
}

wire_enum!(GroupBy, "group by" {
    None => "none",
    Category => "category",
    Priority => "priority",
    Status => "status",
    Assignee => "assignee",
    Single => "all",
});

/// Either no constraint or an exact value to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector<T> {
    /// Matches everything.
    Any,
    /// Matches only this value.
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::Any
    }
}

impl<T> Selector<T> {
    /// Returns true if this selector constrains nothing.
    pub fn is_any(&self) -> bool {
        matches!(self, Selector::Any)
    }

    /// Returns the selected value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Selector::Any => None,
            Selector::Only(v) => Some(v),
        }
    }
}

impl<T: PartialEq> Selector<T> {
    /// Returns true if `candidate` passes this selector.
    ///
    /// A missing candidate never passes `Only`.
    pub fn accepts(&self, candidate: Option<&T>) -> bool {
        match self {
            Selector::Any => true,
            Selector::Only(v) => candidate == Some(v),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Any => f.write_str(ANY),
            Selector::Only(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(ANY) {
            Ok(Selector::Any)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

impl<T: fmt::Display> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Selector<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Assignee selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AssigneeFilter {
    #[default]
    All,
    /// Tasks with no assignee.
    Unassigned,
    /// Tasks assigned to this team member id.
    Member(String),
}

impl AssigneeFilter {
    /// Returns true if a task assigned to `assigned_to` passes.
    pub fn accepts(&self, assigned_to: Option<&str>) -> bool {
        match self {
            AssigneeFilter::All => true,
            AssigneeFilter::Unassigned => assigned_to.is_none(),
            AssigneeFilter::Member(id) => assigned_to == Some(id.as_str()),
        }
    }
}

impl fmt::Display for AssigneeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssigneeFilter::All => f.write_str(ANY),
            AssigneeFilter::Unassigned => f.write_str(UNASSIGNED),
            AssigneeFilter::Member(id) => f.write_str(id),
        }
    }
}

impl FromStr for AssigneeFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Err(FilterError::invalid_value("assignee", s))
        } else if s.eq_ignore_ascii_case(ANY) {
            Ok(AssigneeFilter::All)
        } else if s.eq_ignore_ascii_case(UNASSIGNED) {
            Ok(AssigneeFilter::Unassigned)
        } else {
            Ok(AssigneeFilter::Member(s.to_string()))
        }
    }
}

impl Serialize for AssigneeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssigneeFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Parses a `YYYY-MM-DD` date bound.
pub fn parse_date_bound(raw: &str) -> FilterResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| FilterError::invalid_date(raw))
}

/// Inclusive, date-only range over one task timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub field: DateField,
}

impl DateRange {
    /// A range over `field` between two optional bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>, field: DateField) -> Self {
        Self { start, end, field }
    }

    /// Returns true if either bound is set.
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns true if the calendar day (UTC) of `at` lies within the bounds.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.start.map_or(true, |start| day >= start) && self.end.map_or(true, |end| day <= end)
    }
}

/// The complete search/filter/sort/group configuration of a task view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive text search over title, description and tags.
    pub search: String,
    pub status: StatusFilter,
    pub priority: Selector<Priority>,
    /// Category id selector.
    pub category: Selector<String>,
    pub assignee: AssigneeFilter,
    pub date_range: DateRange,
    /// Tags that must all be present (exact match).
    pub tags: Vec<String>,
    pub has_attachments: bool,
    pub is_shared: bool,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    #[serde(deserialize_with = "group_by_or_none")]
    pub group_by: GroupBy,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterCriteria {
    /// Creates criteria that keep every task, newest first, ungrouped.
    pub fn new() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            priority: Selector::Any,
            category: Selector::Any,
            assignee: AssigneeFilter::All,
            date_range: DateRange::new(None, None, DateField::DueDate),
            tags: Vec::new(),
            has_attachments: false,
            is_shared: false,
            sort_by: SortKey::CreatedAt,
            sort_order: SortOrder::Desc,
            group_by: GroupBy::None,
        }
    }

    /// Returns true if no predicate stage is active (sorting and grouping aside).
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.status == StatusFilter::All
            && self.priority.is_any()
            && self.category.is_any()
            && self.assignee == AssigneeFilter::All
            && !self.date_range.is_active()
            && self.tags.is_empty()
            && !self.has_attachments
            && !self.is_shared
    }
}

/// Creates default filter criteria.
pub fn create_filter_criteria() -> FilterCriteria {
    FilterCriteria::new()
}

// The front end stores "no grouping" as null.
fn group_by_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GroupBy, D::Error> {
    Ok(Option::<GroupBy>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_factory_defaults() {
        let c = FilterCriteria::new();
        assert!(c.search.is_empty());
        assert_eq!(c.status, StatusFilter::All);
        assert_eq!(c.priority, Selector::Any);
        assert_eq!(c.category, Selector::Any);
        assert_eq!(c.assignee, AssigneeFilter::All);
        assert_eq!(c.date_range, DateRange::new(None, None, DateField::DueDate));
        assert!(c.tags.is_empty());
        assert!(!c.has_attachments);
        assert!(!c.is_shared);
        assert_eq!(c.sort_by, SortKey::CreatedAt);
        assert_eq!(c.sort_order, SortOrder::Desc);
        assert_eq!(c.group_by, GroupBy::None);
        assert!(c.is_unfiltered());
    }

    #[test]
    fn test_factory_values_are_independent() {
        let mut a = create_filter_criteria();
        let b = create_filter_criteria();
        assert_eq!(a, b);

        a.tags.push("urgent".to_string());
        a.date_range.start = Some(date(2024, 1, 1));

        assert!(b.tags.is_empty());
        assert!(b.date_range.start.is_none());
        assert_ne!(a, b);
    }

    #[test]
    fn test_wire_enum_parse_accepts_spellings() {
        assert_eq!("dueDate".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("due-date".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("due_date".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("OVERDUE".parse::<StatusFilter>().unwrap(), StatusFilter::Overdue);
        assert_eq!("completedAt".parse::<DateField>().unwrap(), DateField::CompletedAt);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("none".parse::<GroupBy>().unwrap(), GroupBy::None);
    }

    #[test]
    fn test_wire_enum_parse_rejects_unknown() {
        let err = "tags".parse::<GroupBy>().unwrap_err();
        assert_eq!(err, FilterError::invalid_value("group by", "tags"));
        assert_eq!(err.to_string(), "invalid group by: 'tags'");
    }

    #[test]
    fn test_selector_parse_and_accepts() {
        let any: Selector<Priority> = "all".parse().unwrap();
        assert!(any.is_any());
        assert!(any.accepts(None));

        let high: Selector<Priority> = "high".parse().unwrap();
        assert_eq!(high, Selector::Only(Priority::High));
        assert!(high.accepts(Some(&Priority::High)));
        assert!(!high.accepts(Some(&Priority::Low)));
        assert!(!high.accepts(None));

        assert!("urgent".parse::<Selector<Priority>>().is_err());

        let category: Selector<String> = "work".parse().unwrap();
        assert_eq!(category.value().map(String::as_str), Some("work"));
    }

    #[test]
    fn test_assignee_filter() {
        assert_eq!("all".parse::<AssigneeFilter>().unwrap(), AssigneeFilter::All);
        assert_eq!(
            "unassigned".parse::<AssigneeFilter>().unwrap(),
            AssigneeFilter::Unassigned
        );
        assert_eq!(
            "m1".parse::<AssigneeFilter>().unwrap(),
            AssigneeFilter::Member("m1".to_string())
        );
        assert!("".parse::<AssigneeFilter>().is_err());

        assert!(AssigneeFilter::Unassigned.accepts(None));
        assert!(!AssigneeFilter::Unassigned.accepts(Some("m1")));
        assert!(AssigneeFilter::Member("m1".into()).accepts(Some("m1")));
        assert!(!AssigneeFilter::Member("m1".into()).accepts(None));
    }

    #[test]
    fn test_date_range_contains_is_inclusive_by_day() {
        let range = DateRange::new(Some(date(2024, 1, 10)), Some(date(2024, 1, 12)), DateField::DueDate);
        assert!(range.is_active());
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 12, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap()));

        let open_end = DateRange::new(Some(date(2024, 1, 10)), None, DateField::DueDate);
        assert!(open_end.contains(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));

        assert!(!DateRange::default().is_active());
    }

    #[test]
    fn test_parse_date_bound() {
        assert_eq!(parse_date_bound("2024-01-10").unwrap(), date(2024, 1, 10));
        assert_eq!(
            parse_date_bound("10/01/2024").unwrap_err(),
            FilterError::invalid_date("10/01/2024")
        );
    }

    #[test]
    fn test_criteria_json_uses_front_end_shape() {
        let mut c = FilterCriteria::new();
        c.priority = Selector::Only(Priority::High);
        c.assignee = AssigneeFilter::Unassigned;
        c.date_range.start = Some(date(2024, 1, 7));

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["status"], "all");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["category"], "all");
        assert_eq!(json["assignee"], "unassigned");
        assert_eq!(json["dateRange"]["start"], "2024-01-07");
        assert_eq!(json["dateRange"]["type"], "dueDate");
        assert_eq!(json["sortBy"], "createdAt");
        assert_eq!(json["groupBy"], "none");

        let back: FilterCriteria = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_criteria_json_partial_and_null_group_by() {
        let json = r#"{"status": "pending", "groupBy": null, "dateRange": {"start": null, "end": null, "type": "createdAt"}}"#;
        let c: FilterCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(c.status, StatusFilter::Pending);
        assert_eq!(c.group_by, GroupBy::None);
        assert_eq!(c.date_range.field, DateField::CreatedAt);
        assert_eq!(c.sort_order, SortOrder::Desc);
    }
}
