//! Domain-level command types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod orders {
    /// One raw cost entry exactly as typed by the user.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RawCostEntry {
        pub member_id: String,
        pub cost: Option<String>,
    }

    impl RawCostEntry {
        pub fn new(member_id: &str, cost: Option<&str>) -> Self {
            Self {
                member_id: member_id.to_string(),
                cost: cost.map(str::to_string),
            }
        }
    }

    /// Input for recording one day's orders.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SubmitDailyOrdersCommand {
        pub entries: Vec<RawCostEntry>,
    }
}

pub mod members {
    /// Input for adding a member to the roster.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AddMemberCommand {
        pub name: String,
    }
}
