use crate::models::{AppointmentStatus, Role};

/// Outcome of an authorization check for a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny(&'static str),
}

/// Decides whether an actor may move an appointment to `requested`.
///
/// Admins may rewrite status freely, including out of a settled state.
/// Regular users get exactly one self-service transition: cancelling their
/// own appointment while it is still pending.
pub fn authorize_transition(
    role: Role,
    is_owner: bool,
    current: AppointmentStatus,
    requested: AppointmentStatus,
) -> Decision {
    if role.is_admin() {
        return Decision::Permit;
    }
    if !is_owner {
        return Decision::Deny("forbidden: not owner");
    }
    if requested != AppointmentStatus::Cancelled {
        return Decision::Deny("only cancellation permitted for non-admin");
    }
    if current != AppointmentStatus::Pending {
        return Decision::Deny("only pending appointments may be cancelled by owner");
    }
    Decision::Permit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus::{Cancelled, Confirmed, Pending};

    const ALL_STATUSES: [AppointmentStatus; 3] = [Pending, Confirmed, Cancelled];

    #[test]
    fn test_admin_always_permitted() {
        for is_owner in [true, false] {
            for current in ALL_STATUSES {
                for requested in ALL_STATUSES {
                    assert_eq!(
                        authorize_transition(Role::Admin, is_owner, current, requested),
                        Decision::Permit,
                        "admin denied {current:?} -> {requested:?} (owner: {is_owner})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_owner_always_denied() {
        for current in ALL_STATUSES {
            for requested in ALL_STATUSES {
                assert_eq!(
                    authorize_transition(Role::User, false, current, requested),
                    Decision::Deny("forbidden: not owner"),
                );
            }
        }
    }

    #[test]
    fn test_owner_may_cancel_pending() {
        assert_eq!(
            authorize_transition(Role::User, true, Pending, Cancelled),
            Decision::Permit,
        );
    }

    #[test]
    fn test_owner_may_not_confirm() {
        for current in ALL_STATUSES {
            assert_eq!(
                authorize_transition(Role::User, true, current, Confirmed),
                Decision::Deny("only cancellation permitted for non-admin"),
            );
        }
    }

    #[test]
    fn test_owner_may_not_cancel_settled_appointment() {
        for current in [Confirmed, Cancelled] {
            assert_eq!(
                authorize_transition(Role::User, true, current, Cancelled),
                Decision::Deny("only pending appointments may be cancelled by owner"),
            );
        }
    }

    #[test]
    fn test_decision_is_stable() {
        // Same inputs, same answer; the policy keeps no state.
        for is_owner in [true, false] {
            for current in ALL_STATUSES {
                for requested in ALL_STATUSES {
                    let first = authorize_transition(Role::User, is_owner, current, requested);
                    let second = authorize_transition(Role::User, is_owner, current, requested);
                    assert_eq!(first, second);
                }
            }
        }
    }
}
