// Copyright (C) 2015-2025 The Neo Project.
//
// confirmation.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Checks over an application log that has already been fetched.
//!
//! Every check reads the first execution only.

use crate::error::{DappkitError, DappkitResult};
use neo_dappkit_types::{ApplicationLog, Neo3Event, Notification, VMState};

/// Fails unless the transaction ended in `HALT`.
pub fn confirm_halt(log: &ApplicationLog) -> DappkitResult<()> {
    let state = log
        .first_execution()
        .map_or(VMState::NONE, |execution| execution.state);
    if state != VMState::HALT {
        return Err(DappkitError::transaction(format!(
            "Transaction failed. VMState: {state}"
        )));
    }
    Ok(())
}

/// Fails unless the first stack item is the boolean `true`.
pub fn confirm_stack_true(log: &ApplicationLog) -> DappkitResult<()> {
    let top = log
        .first_execution()
        .and_then(|execution| execution.stack.first())
        .ok_or_else(|| {
            DappkitError::transaction("Transaction failed. No stack found in transaction result")
        })?;
    if !top.is_true() {
        return Err(DappkitError::transaction(
            "Transaction failed. Stack value is not true",
        ));
    }
    Ok(())
}

/// The first notification `event` names, if it was emitted.
pub fn get_notification_state<'a>(
    log: &'a ApplicationLog,
    event: &Neo3Event,
) -> Option<&'a Notification> {
    log.first_execution()?
        .notifications
        .iter()
        .find(|notification| event.matches(notification))
}

/// Confirms `HALT`, then optionally a `true` result, then optionally an event.
pub fn confirm_transaction(
    log: &ApplicationLog,
    event_to_check: Option<&Neo3Event>,
    confirm_stack_true_result: bool,
) -> DappkitResult<()> {
    confirm_halt(log)?;

    if confirm_stack_true_result {
        confirm_stack_true(log)?;
    }

    if let Some(event) = event_to_check {
        if get_notification_state(log, event).is_none() {
            return Err(DappkitError::transaction(
                "Transaction failed. Event not found in transaction result",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_dappkit_types::{ApplicationExecution, StackItem};

    const GAS: &str = "0xd2a4cff31913016155e38e474a2c06d08be276cf";

    fn log(state: VMState, stack: Vec<StackItem>, notifications: Vec<Notification>) -> ApplicationLog {
        ApplicationLog {
            txid: "0x01".to_string(),
            executions: vec![ApplicationExecution {
                trigger: "Application".to_string(),
                state,
                gasconsumed: "0".to_string(),
                exception: None,
                stack,
                notifications,
            }],
        }
    }

    fn transfer() -> Notification {
        Notification {
            contract: GAS.to_string(),
            eventname: "Transfer".to_string(),
            state: StackItem::array(vec![]),
        }
    }

    #[test]
    fn halt_is_required_first() {
        let faulted = log(VMState::FAULT, vec![StackItem::boolean(true)], vec![transfer()]);
        let err = confirm_transaction(&faulted, Some(&Neo3Event::new(GAS, "Transfer")), true)
            .unwrap_err();
        assert_eq!(err.to_string(), "Transaction failed. VMState: FAULT");

        let halted = log(VMState::HALT, vec![], vec![]);
        assert!(confirm_transaction(&halted, None, false).is_ok());
    }

    #[test]
    fn log_without_executions_is_not_halted() {
        let empty = ApplicationLog {
            txid: "0x01".to_string(),
            executions: vec![],
        };
        assert_eq!(
            confirm_halt(&empty).unwrap_err().to_string(),
            "Transaction failed. VMState: NONE"
        );
    }

    #[test]
    fn stack_must_start_with_true() {
        let no_stack = log(VMState::HALT, vec![], vec![]);
        assert_eq!(
            confirm_stack_true(&no_stack).unwrap_err().to_string(),
            "Transaction failed. No stack found in transaction result"
        );

        let integer = log(VMState::HALT, vec![StackItem::integer(1)], vec![]);
        assert_eq!(
            confirm_stack_true(&integer).unwrap_err().to_string(),
            "Transaction failed. Stack value is not true"
        );

        let truthy = log(VMState::HALT, vec![StackItem::boolean(true)], vec![]);
        assert!(confirm_transaction(&truthy, None, true).is_ok());
    }

    #[test]
    fn finds_emitted_events() {
        let halted = log(VMState::HALT, vec![], vec![transfer()]);
        assert!(get_notification_state(&halted, &Neo3Event::new(GAS, "Transfer")).is_some());
        assert!(get_notification_state(&halted, &Neo3Event::new(GAS, "Mint")).is_none());

        let err = confirm_transaction(&halted, Some(&Neo3Event::new(GAS, "Mint")), false)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transaction failed. Event not found in transaction result"
        );
    }
}
