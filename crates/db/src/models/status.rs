//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Project funding lifecycle status. The Funded transition is monotonic
    /// and happens only via `ProjectRepo::mark_funded`.
    ProjectStatus {
        Draft = 1,
        PendingApproval = 2,
        Approved = 3,
        Funded = 4,
        Rejected = 5,
    }
}

define_status_enum! {
    /// Payment settlement status. Pending -> Success exactly once.
    PaymentStatus {
        Pending = 1,
        Success = 2,
    }
}

define_status_enum! {
    /// Investment lifecycle status.
    InvestmentStatus {
        Active = 1,
    }
}

define_status_enum! {
    /// Investor KYC review status.
    KycStatus {
        Pending = 1,
        Approved = 2,
        Rejected = 3,
    }
}

define_status_enum! {
    /// User role, matching the `roles` seed data.
    Role {
        Admin = 1,
        Builder = 2,
        Investor = 3,
    }
}
