//! `pagseguro checkout` - open a checkout.

use std::str::FromStr;

use pagseguro::{Amount, Item, PagSeguroClient};
use tracing::info;

use super::CommandError;

/// An item given as `ID:DESCRIPTION:AMOUNT:QUANTITY:WEIGHT`.
///
/// The description may itself contain colons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg(Item);

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tail = s.rsplitn(4, ':');
        let (Some(weight), Some(quantity), Some(amount), Some(head)) =
            (tail.next(), tail.next(), tail.next(), tail.next())
        else {
            return Err(format!("expected ID:DESCRIPTION:AMOUNT:QUANTITY:WEIGHT, got {s:?}"));
        };

        let (id, description) = head
            .split_once(':')
            .ok_or_else(|| format!("missing description in {s:?}"))?;

        if id.trim().is_empty() {
            return Err(format!("empty item id in {s:?}"));
        }

        let amount: Amount = amount.parse().map_err(|e| format!("{e}"))?;
        let quantity: u32 = quantity
            .trim()
            .parse()
            .map_err(|e| format!("invalid quantity {quantity:?}: {e}"))?;
        let weight: u32 = weight
            .trim()
            .parse()
            .map_err(|e| format!("invalid weight {weight:?}: {e}"))?;

        Ok(Self(Item::new(
            id.trim(),
            description.trim(),
            amount,
            quantity,
            weight,
        )))
    }
}

/// Arguments of the checkout command.
#[derive(Debug)]
pub struct CheckoutArgs {
    pub items: Vec<ItemArg>,
    pub reference: Option<String>,
    pub sender_email: Option<String>,
    pub sender_name: Option<String>,
    pub redirect_url: Option<String>,
}

/// Open a checkout and log where the buyer should pay.
pub async fn run(client: &PagSeguroClient, args: CheckoutArgs) -> Result<(), CommandError> {
    let mut request = client.checkout_request();

    if let Some(reference) = args.reference {
        request.set_reference(reference);
    }
    for ItemArg(item) in args.items {
        request.add_item(item);
    }
    request.sender.email = args.sender_email;
    request.sender.name = args.sender_name;
    request.redirect_url = args.redirect_url;

    info!(
        reference = %request.reference(),
        items = request.items.len(),
        "Opening checkout..."
    );
    let checkout = client.checkout(&request).await?;

    info!(code = %checkout.code, "Checkout created");
    info!("Payment URL: {}", checkout.payment_url);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let ItemArg(item) = "0001:Notebook Prata:24300.00:1:1000".parse().unwrap();
        assert_eq!(item.id, "0001");
        assert_eq!(item.description, "Notebook Prata");
        assert_eq!(item.amount, Amount::from_cents(2_430_000));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.weight, 1000);
    }

    #[test]
    fn test_parse_item_description_with_colon() {
        let ItemArg(item) = "7:Cabo USB: 2m:19.90:3:50".parse().unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.description, "Cabo USB: 2m");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_parse_item_errors() {
        assert!("0001:Notebook:24300.00:1".parse::<ItemArg>().is_err());
        assert!("0001:Notebook:abc:1:1000".parse::<ItemArg>().is_err());
        assert!("0001:Notebook:10.00:-1:1000".parse::<ItemArg>().is_err());
        assert!(":Notebook:10.00:1:1000".parse::<ItemArg>().is_err());
    }
}
