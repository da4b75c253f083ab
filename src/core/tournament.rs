//! Tournament and event listings

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum TournamentCategory {
    Running,
    Upcoming,
    Past,
}

impl TournamentCategory {
    pub const ALL: [TournamentCategory; 3] = [
        TournamentCategory::Running,
        TournamentCategory::Upcoming,
        TournamentCategory::Past,
    ];
}

impl Display for TournamentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TournamentCategory::Running => "Running",
                TournamentCategory::Upcoming => "Upcoming",
                TournamentCategory::Past => "Past",
            }
        )
    }
}

impl FromStr for TournamentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(TournamentCategory::Running),
            "upcoming" => Ok(TournamentCategory::Upcoming),
            "past" => Ok(TournamentCategory::Past),
            _ => Err(anyhow!("Invalid tournament category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: u32,
    pub title: String,
    pub date_label: String,
    pub status: String,
    pub category: TournamentCategory,
}

/// Lifecycle stage tabs of the event schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum EventStage {
    Create,
    Configure,
    Schedule,
    Live,
    Complete,
}

impl EventStage {
    pub const ALL: [EventStage; 5] = [
        EventStage::Create,
        EventStage::Configure,
        EventStage::Schedule,
        EventStage::Live,
        EventStage::Complete,
    ];
}

impl Display for EventStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EventStage::Create => "Create",
                EventStage::Configure => "Configure",
                EventStage::Schedule => "Schedule",
                EventStage::Live => "Live",
                EventStage::Complete => "Complete",
            }
        )
    }
}

impl FromStr for EventStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(EventStage::Create),
            "configure" => Ok(EventStage::Configure),
            "schedule" => Ok(EventStage::Schedule),
            "live" => Ok(EventStage::Live),
            "complete" => Ok(EventStage::Complete),
            _ => Err(anyhow!("Invalid event stage: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub id: u32,
    pub name: String,
    pub date_label: String,
    pub status: String,
    pub stage: EventStage,
}

/// Tournaments in `category`, in their original order.
pub fn filter_by_category(
    tournaments: &[Tournament],
    category: TournamentCategory,
) -> Vec<Tournament> {
    tournaments
        .iter()
        .filter(|t| t.category == category)
        .cloned()
        .collect()
}

pub fn filter_by_stage(events: &[ScheduledEvent], stage: EventStage) -> Vec<ScheduledEvent> {
    events.iter().filter(|e| e.stage == stage).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(id: u32, category: TournamentCategory) -> Tournament {
        Tournament {
            id,
            title: format!("Tournament {id}"),
            date_label: "Aug 15 - Aug 18, 2024".to_string(),
            status: "Live".to_string(),
            category,
        }
    }

    #[test]
    fn test_filter_by_category_keeps_order() {
        let all = vec![
            tournament(1, TournamentCategory::Running),
            tournament(2, TournamentCategory::Past),
            tournament(3, TournamentCategory::Running),
        ];
        let running = filter_by_category(&all, TournamentCategory::Running);
        assert_eq!(running.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(filter_by_category(&all, TournamentCategory::Upcoming).is_empty());
        assert!(filter_by_category(&[], TournamentCategory::Past).is_empty());
    }

    #[test]
    fn test_filter_by_stage() {
        let events = vec![
            ScheduledEvent {
                id: 1,
                name: "Men's Singles".to_string(),
                date_label: "Nov 12 - Nov 15, 2025".to_string(),
                status: "Pending".to_string(),
                stage: EventStage::Create,
            },
            ScheduledEvent {
                id: 6,
                name: "Veterans League".to_string(),
                date_label: "Nov 01 - Nov 03, 2025".to_string(),
                status: "Completed".to_string(),
                stage: EventStage::Complete,
            },
        ];
        let done = filter_by_stage(&events, EventStage::Complete);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].name, "Veterans League");
        assert!(filter_by_stage(&events, EventStage::Live).is_empty());
    }

    #[test]
    fn test_parse_tabs() {
        assert_eq!(
            "Upcoming".parse::<TournamentCategory>().unwrap(),
            TournamentCategory::Upcoming
        );
        assert_eq!("LIVE".parse::<EventStage>().unwrap(), EventStage::Live);
        assert!("Finished".parse::<TournamentCategory>().is_err());
        assert!("draft".parse::<EventStage>().is_err());
    }
}
