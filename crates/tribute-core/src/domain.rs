use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeceasedInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
    #[serde(default)]
    pub biography: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Partial update for the deceased section. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeceasedPatch {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
    pub biography: Option<String>,
}

/// Partial update for the account section. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionUpdate {
    Deceased(DeceasedPatch),
    User(UserPatch),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Standard,
    Premium,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Standard, Plan::Premium];

    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Standard => "standard",
            Plan::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Classic,
    Modern,
    Nature,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Modern, Theme::Nature];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Modern => "modern",
            Theme::Nature => "nature",
        }
    }
}

/// Plan and theme picked on the last wizard step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSelection {
    pub plan: Option<Plan>,
    pub theme: Option<Theme>,
}

/// Form data accumulated across one wizard session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub deceased: DeceasedInfo,
    pub user: UserInfo,
    pub plan: Option<Plan>,
    pub theme: Option<Theme>,
}

impl SignupDraft {
    pub fn apply(&mut self, update: SectionUpdate) {
        match update {
            SectionUpdate::Deceased(patch) => {
                merge_field(&mut self.deceased.name, patch.name);
                merge_field(&mut self.deceased.date_of_birth, patch.date_of_birth);
                merge_field(&mut self.deceased.date_of_death, patch.date_of_death);
                merge_field(&mut self.deceased.biography, patch.biography);
            }
            SectionUpdate::User(patch) => {
                merge_field(&mut self.user.first_name, patch.first_name);
                merge_field(&mut self.user.last_name, patch.last_name);
                merge_field(&mut self.user.email, patch.email);
                merge_field(&mut self.user.phone, patch.phone);
                merge_field(&mut self.user.password, patch.password);
                merge_field(&mut self.user.confirm_password, patch.confirm_password);
            }
        }
    }

    /// Builds the flat payload. Returns `None` until plan and theme are both set.
    pub fn to_payload(&self) -> Option<SignupPayload> {
        Some(SignupPayload {
            deceased: self.deceased.clone(),
            user: self.user.clone(),
            plan: self.plan?,
            theme: self.theme?,
        })
    }
}

fn merge_field(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Registration body: deceased, account, plan and theme merged into one flat object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupPayload {
    #[serde(flatten)]
    pub deceased: DeceasedInfo,
    #[serde(flatten)]
    pub user: UserInfo,
    pub plan: Plan,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupReceipt {
    pub redirect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Responded,
    Closed,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Responded => "responded",
            TicketStatus::Closed => "closed",
            TicketStatus::Unknown => "unknown",
        }
    }
}

/// Admin-side projection of a support message thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(deserialize_with = "ticket_id_from_wire")]
    pub id: TicketId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub initial_content: String,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Older message stores send `date` instead of, or next to, `updated_at`.
    #[serde(default)]
    pub date: Option<String>,
}

impl Ticket {
    pub fn last_updated(&self) -> Option<&str> {
        self.updated_at.as_deref().or(self.date.as_deref())
    }
}

// The message store hands out numeric ids on some endpoints and strings on others.
fn ticket_id_from_wire<'de, D>(deserializer: D) -> Result<TicketId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
        Text(String),
        Number(u64),
    }

    Ok(match WireId::deserialize(deserializer)? {
        WireId::Text(s) => TicketId(s),
        WireId::Number(n) => TicketId(n.to_string()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Info,
    Warning,
    Success,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
