//! Field Registry - Canonical fields and the header vocabulary that maps
//! onto them.
//!
//! Every supported export template (the legacy feedback form, the unified
//! template, and the community event export) spells its column headers
//! differently. The registry maps each known header string onto exactly one
//! canonical field. Header lookup is by exact match on the trimmed header;
//! when two present headers resolve to the same canonical field, the entry
//! that appears first in `FIELD_REGISTRY` wins.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Canonical fields a survey response can be mapped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Satisfaction,
    RecommendationScore,
    SessionsAttended,
    VenueRating,
    SpeakerRating,
    ContentRating,
    PositiveFeedback,
    ImprovementFeedback,
    AdditionalComments,
    PreferredTime,
    PreferredVenue,
    Pacing,
    EventDiscovery,
    OneWordDesc,
    CourseYear,
    WouldJoin,
    GainedInsights,
    PlanToImplement,
    FeltIncluded,
    FamiliarityLevel,
    EventName,
    EventDate,
    EventType,
    Chapter,
    ChapterCountry,
    City,
}

impl CanonicalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Satisfaction => "satisfaction",
            CanonicalField::RecommendationScore => "recommendation_score",
            CanonicalField::SessionsAttended => "sessions_attended",
            CanonicalField::VenueRating => "venue_rating",
            CanonicalField::SpeakerRating => "speaker_rating",
            CanonicalField::ContentRating => "content_rating",
            CanonicalField::PositiveFeedback => "positive_feedback",
            CanonicalField::ImprovementFeedback => "improvement_feedback",
            CanonicalField::AdditionalComments => "additional_comments",
            CanonicalField::PreferredTime => "preferred_time",
            CanonicalField::PreferredVenue => "preferred_venue",
            CanonicalField::Pacing => "pacing",
            CanonicalField::EventDiscovery => "event_discovery",
            CanonicalField::OneWordDesc => "one_word_desc",
            CanonicalField::CourseYear => "course_year",
            CanonicalField::WouldJoin => "would_join",
            CanonicalField::GainedInsights => "gained_insights",
            CanonicalField::PlanToImplement => "plan_to_implement",
            CanonicalField::FeltIncluded => "felt_included",
            CanonicalField::FamiliarityLevel => "familiarity_level",
            CanonicalField::EventName => "event_name",
            CanonicalField::EventDate => "event_date",
            CanonicalField::EventType => "event_type",
            CanonicalField::Chapter => "chapter",
            CanonicalField::ChapterCountry => "chapter_country",
            CanonicalField::City => "city",
        }
    }

    /// Fields every batch must provide. Missing any of them fails the
    /// extraction before row processing starts.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            CanonicalField::Satisfaction
                | CanonicalField::PositiveFeedback
                | CanonicalField::ImprovementFeedback
                | CanonicalField::Pacing
        )
    }
}

/// All required canonical fields, in the order they are reported when
/// missing.
pub const REQUIRED_FIELDS: [CanonicalField; 4] = [
    CanonicalField::Satisfaction,
    CanonicalField::PositiveFeedback,
    CanonicalField::ImprovementFeedback,
    CanonicalField::Pacing,
];

/// Column headers that identify an individual respondent or internal
/// tracking state. Always dropped, whether or not a mapping exists.
pub const PII_HEADERS: [&str; 14] = [
    "First Name",
    "Last Name",
    "Email",
    "Responded",
    "User ID",
    "Attendee ID",
    "Attendee Registration Date",
    "Attendee Check-in Date",
    "Chapter Region",
    "Chapter State",
    "Event ID",
    "Chapter ID",
    "Order Number",
    "Ticket Number",
];

lazy_static! {
    /// Header-to-field mapping rules in declaration priority order.
    pub static ref FIELD_REGISTRY: Vec<(&'static str, CanonicalField)> = vec![
        // Legacy form
        ("Overall Satisfaction", CanonicalField::Satisfaction),
        // Unified template
        (
            "Overall, how satisfied were you with this event?",
            CanonicalField::Satisfaction,
        ),
        // Community export; the expectation question is its primary
        // satisfaction metric
        (
            "How well did the content of the event meet your expectations?",
            CanonicalField::Satisfaction,
        ),
        (
            "How likely are you to recommend our events to a friend or colleague?",
            CanonicalField::RecommendationScore,
        ),
        (
            "How likely are you to recommend our events to a friend or colleague? (1 - Strongly Discourage, 5 - Absolutely Must Go)",
            CanonicalField::RecommendationScore,
        ),
        ("Which sessions did you attend?", CanonicalField::SessionsAttended),
        (
            "Please rate the following aspects of the event [Venue]",
            CanonicalField::VenueRating,
        ),
        ("Venue Rating", CanonicalField::VenueRating),
        (
            "How would you rate the venue/platform overall (e.g., Visual/Audio Quality, Reception, Moderation & Engagement)?",
            CanonicalField::VenueRating,
        ),
        (
            "Please rate the following aspects of the event [Speakers]",
            CanonicalField::SpeakerRating,
        ),
        ("Speaker Rating", CanonicalField::SpeakerRating),
        (
            "How would you rate the speakers overall (e.g., Depth of Knowledge, Clarity & Coherence, Presentation)?",
            CanonicalField::SpeakerRating,
        ),
        (
            "Please rate the following aspects of the event [Content Relevance]",
            CanonicalField::ContentRating,
        ),
        ("Content Relevance", CanonicalField::ContentRating),
        ("What did you like most about the event?", CanonicalField::PositiveFeedback),
        ("What could be improved?", CanonicalField::ImprovementFeedback),
        ("Any additional comments?", CanonicalField::AdditionalComments),
        ("Preferred Time Slot", CanonicalField::PreferredTime),
        ("Preferred Venue", CanonicalField::PreferredVenue),
        ("Pacing", CanonicalField::Pacing),
        // Community export pacing is on a 1-10 scale; the normalizer
        // rescales it
        (
            "From a scale of 1 - 10, how was the pacing of the event (1 being too slow and 10 being too fast)?",
            CanonicalField::Pacing,
        ),
        ("From a scale of 1 - 5 ?", CanonicalField::Pacing),
        (
            "From a scale of 1 - 5, how was the pacing of the event?",
            CanonicalField::Pacing,
        ),
        ("How was the pacing of the event?", CanonicalField::Pacing),
        ("Event Discovery Channel", CanonicalField::EventDiscovery),
        ("One-Word Description", CanonicalField::OneWordDesc),
        ("How did you hear about this event?", CanonicalField::EventDiscovery),
        (
            "Please describe the event in one word :D (Also, this is a reminder to drink water!). Thank you for your time!",
            CanonicalField::OneWordDesc,
        ),
        (
            "Any other concerns or suggestions? Comments about the event? Workshop or community activity suggestions? What should we cover next? Anything will do! We take our time reading these ^ _ ^",
            CanonicalField::ImprovementFeedback,
        ),
        (
            "What did you find most useful from the topics presented?",
            CanonicalField::PositiveFeedback,
        ),
        (
            "For online events like these (workshops, webinars, etc.), which of the following time ranges would be most convenient for you?",
            CanonicalField::PreferredTime,
        ),
        ("Course & Year Level (e.g., BSCS2)", CanonicalField::CourseYear),
        (
            "Would you join another event organized by this community based on your experience?",
            CanonicalField::WouldJoin,
        ),
        (
            "Did the event help you gain new insights? Did the event give you applicable knowledge for your professional careers?",
            CanonicalField::GainedInsights,
        ),
        (
            "Do you plan to implement what you learned in the near future?",
            CanonicalField::PlanToImplement,
        ),
        ("I felt included at this event", CanonicalField::FeltIncluded),
        (
            "How familiar are you with Google Developer Tools after this event?",
            CanonicalField::FamiliarityLevel,
        ),
        // Export metadata, kept for display and filtering
        ("Event", CanonicalField::EventName),
        ("Event Date", CanonicalField::EventDate),
        ("Event Type", CanonicalField::EventType),
        ("Chapter", CanonicalField::Chapter),
        ("Chapter Country", CanonicalField::ChapterCountry),
        ("City", CanonicalField::City),
    ];
}
