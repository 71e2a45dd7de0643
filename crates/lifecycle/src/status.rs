//! Document kinds, status enums, and the canonical transition tables.
//!
//! Every status value belongs to exactly one document kind; unknown strings
//! are rejected at parse time. A status with no outgoing edges is terminal.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use flowdesk_core::DomainError;

use crate::transitions::StatusMachine;

/// Kind of lifecycle-bearing business document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quote,
    Contract,
    Project,
    ResourcePayout,
    InboundRequest,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
            DocumentKind::Contract => "contract",
            DocumentKind::Project => "project",
            DocumentKind::ResourcePayout => "resource_payout",
            DocumentKind::InboundRequest => "inbound_request",
        }
    }
}

impl core::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(DocumentKind::Invoice),
            "quote" => Ok(DocumentKind::Quote),
            "contract" => Ok(DocumentKind::Contract),
            "project" => Ok(DocumentKind::Project),
            "resource_payout" => Ok(DocumentKind::ResourcePayout),
            "inbound_request" => Ok(DocumentKind::InboundRequest),
            other => Err(DomainError::validation(format!(
                "unknown document kind: {other}"
            ))),
        }
    }
}

/// Define a status enum plus its transition table.
///
/// Each `variant = "string" => [targets]` row becomes one enum variant and one
/// row of [`StatusMachine::allowed_targets`]. An empty target list marks a
/// terminal status.
macro_rules! define_status {
    (
        $(#[$meta:meta])*
        $name:ident for $kind:ident {
            $($variant:ident = $label:literal => [$($next:ident),* $(,)?]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every status of this kind, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(DomainError::validation(format!(
                        concat!("unknown ", stringify!($kind), " status: {}"),
                        other
                    ))),
                }
            }
        }

        impl StatusMachine for $name {
            const KIND: DocumentKind = DocumentKind::$kind;

            fn allowed_targets(self) -> &'static [Self] {
                match self {
                    $(Self::$variant => &[$(Self::$next),*],)+
                }
            }

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }
    };
}

define_status! {
    /// Invoice lifecycle. `partially_paid`/`paid` are usually system-forced
    /// from payment totals; `overdue` is set by the caller past the due date.
    InvoiceStatus for Invoice {
        Draft = "draft" => [Sent, Void],
        Sent = "sent" => [PartiallyPaid, Paid, Overdue, Void],
        PartiallyPaid = "partially_paid" => [Paid, Overdue, Void],
        Overdue = "overdue" => [PartiallyPaid, Paid, Void],
        Paid = "paid" => [Void],
        Void = "void" => [],
    }
}

define_status! {
    /// Quote lifecycle. `converted` is terminal; rejected/expired quotes can
    /// be redrafted.
    QuoteStatus for Quote {
        Draft = "draft" => [Sent],
        Sent = "sent" => [Approved, Rejected, Expired],
        Approved = "approved" => [Converted],
        Rejected = "rejected" => [Draft],
        Expired = "expired" => [Draft],
        Converted = "converted" => [],
    }
}

define_status! {
    /// Contract lifecycle.
    ContractStatus for Contract {
        Draft = "draft" => [Sent, Void],
        Sent = "sent" => [Signed, Expired, Void],
        Signed = "signed" => [Expired, Void],
        Expired = "expired" => [Void],
        Void = "void" => [],
    }
}

define_status! {
    /// Project lifecycle. Cancelled projects can be redrafted; completed
    /// projects cannot.
    ProjectStatus for Project {
        Draft = "draft" => [Active, Cancelled],
        Active = "active" => [OnHold, Completed, Cancelled],
        OnHold = "on_hold" => [Active, Cancelled],
        Completed = "completed" => [],
        Cancelled = "cancelled" => [Draft],
    }
}

define_status! {
    /// Resource payout lifecycle.
    PayoutStatus for ResourcePayout {
        Pending = "pending" => [Approved, Rejected],
        Approved = "approved" => [Paid, Rejected],
        Rejected = "rejected" => [Pending],
        Paid = "paid" => [],
    }
}

define_status! {
    /// Inbound request lifecycle. Both outcomes are terminal.
    InboundRequestStatus for InboundRequest {
        New = "new" => [InReview, Approved, Denied],
        InReview = "in_review" => [Approved, Denied],
        Approved = "approved" => [],
        Denied = "denied" => [],
    }
}
