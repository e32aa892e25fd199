//! `griddle checkout` command
//!
//! Cash orders are confirmed with a code texted to the customer; the code
//! is read from stdin. Card orders need a payment-method id from the card
//! processor.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use crate::cli::CheckoutArgs;
use crate::GlobalOptions;
use griddle::api::CustomerInfo;
use griddle::ops::checkout::{CashStep, CheckoutError, OrderConfirmation, PaymentMethod};
use griddle::ops::ledger::CartStore;
use griddle::ops::pickup::PickupTime;
use griddle::util::{Shell, Status};
use griddle::{CartLedger, Checkout, OrderBackend};

pub fn execute(args: CheckoutArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let config = &global_opts.config;

    let mut ledger = global_opts.ledger();
    if ledger.is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    let payment = match &args.payment {
        Some(raw) => raw.parse::<PaymentMethod>().map_err(anyhow::Error::msg)?,
        None => config.payment().unwrap_or_default(),
    };
    if payment == PaymentMethod::Card && args.payment_method_id.is_none() {
        bail!("paying by card needs `--payment-method-id`");
    }
    let pickup = PickupTime::parse(&args.pickup)?;

    let backend = global_opts.backend()?;
    let mut hours = config.business_hours()?;
    match shell.spin(Status::Fetching, "closures", || backend.closed_dates()) {
        Ok(dates) => hours = hours.with_closed_dates(dates),
        Err(e) => shell.warn(format!("could not fetch store closures: {}", e)),
    }

    let mut checkout = Checkout::new(CustomerInfo::new(&args.name, &args.phone), payment)
        .with_pickup(pickup)
        .with_hours(hours)
        .with_card_fee(config.card_fee_percent());
    checkout.ensure_reachable(ledger.cart())?;
    // Reject a bad pickup time before anything is sent.
    checkout.submission(ledger.cart())?;

    shell.note(format!(
        "{} for {}, pickup {}",
        checkout.amount_due(ledger.cart()),
        checkout.customer().name.trim(),
        checkout.pickup()
    ));

    let confirmation = match payment {
        PaymentMethod::Card => {
            let payment_method_id = args.payment_method_id.as_deref().unwrap_or_default();
            shell.spin(Status::Paying, "card payment", || {
                checkout
                    .pay_by_card(&backend, &mut ledger, payment_method_id)
                    .map(Clone::clone)
            })?
        }
        PaymentMethod::Cash => {
            let stdin = io::stdin();
            pay_cash(shell, &mut checkout, &backend, &mut ledger, &mut stdin.lock())?
        }
    };

    shell.status(Status::Ordered, &confirmation.message);
    shell.note(format!(
        "{} by {}, ready in {}",
        confirmation.amount, confirmation.payment, confirmation.estimate
    ));
    Ok(())
}

/// What the customer typed at the code prompt.
#[derive(Debug, PartialEq, Eq)]
enum CodeEntry {
    Code(String),
    Resend,
    Done,
}

fn read_code(input: &mut impl BufRead) -> Result<CodeEntry> {
    eprint!("verification code (or `resend`): ");
    io::stderr().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(CodeEntry::Done);
    }
    Ok(parse_code_entry(&line))
}

fn parse_code_entry(line: &str) -> CodeEntry {
    let line = line.trim();
    if line.eq_ignore_ascii_case("resend") {
        CodeEntry::Resend
    } else {
        CodeEntry::Code(line.to_string())
    }
}

/// Run the SMS verification loop until the order is placed.
fn pay_cash<B, S>(
    shell: &Shell,
    checkout: &mut Checkout,
    backend: &B,
    ledger: &mut CartLedger<S>,
    input: &mut impl BufRead,
) -> Result<OrderConfirmation>
where
    B: OrderBackend,
    S: CartStore,
{
    loop {
        let sent = shell.spin(Status::Sending, "verification code", || {
            checkout.send_sms(backend, ledger).map(str::to_string)
        })?;
        shell.note(sent);

        loop {
            let code = match read_code(input)? {
                CodeEntry::Code(code) => code,
                CodeEntry::Resend => {
                    checkout.resend();
                    break;
                }
                CodeEntry::Done => bail!("no verification code entered; the order was not placed"),
            };

            let result = shell.spin(Status::Verifying, "code", || {
                checkout.verify(backend, ledger, &code).map(Clone::clone)
            });
            match result {
                Ok(confirmation) => return Ok(confirmation),
                // A wrong code leaves the checkout waiting for another one.
                Err(e) if checkout.step() == CashStep::Verifying => shell.warn(e),
                Err(e) => return Err(e.into()),
            }
        }
    }
}
