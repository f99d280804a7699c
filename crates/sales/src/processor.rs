use crate::order::Order;
use crate::order_number::{OrderNumberSource, RandomOrderNumbers};

/// Assigns order numbers and marks orders as processed.
///
/// Performs no validation: callers on the direct (non-builder) path are
/// expected to have validated the order already.
pub struct OrderProcessor {
    numbers: Box<dyn OrderNumberSource>,
}

impl OrderProcessor {
    pub fn new(numbers: impl OrderNumberSource + 'static) -> Self {
        Self {
            numbers: Box::new(numbers),
        }
    }

    /// Processor with a reproducible number sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomOrderNumbers::seeded(seed))
    }

    pub fn process(&mut self, order: &mut Order) {
        let number = self.numbers.next_order_number();
        tracing::debug!(
            customer_id = %order.customer_id(),
            order_number = %number,
            "assigned order number"
        );
        order.mark_processed(number);
    }
}

impl Default for OrderProcessor {
    fn default() -> Self {
        Self::new(RandomOrderNumbers::from_entropy())
    }
}

impl core::fmt::Debug for OrderProcessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderProcessor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_number::OrderNumber;

    #[test]
    fn process_assigns_number_and_marks_processed() {
        let mut processor = OrderProcessor::new(|| OrderNumber::from_sequence(321));
        let mut order = Order::default();

        processor.process(&mut order);

        assert!(order.is_processed());
        assert_eq!(order.order_number().map(OrderNumber::as_str), Some("O321"));
    }

    #[test]
    fn process_does_not_validate() {
        let mut processor = OrderProcessor::seeded(1);
        let mut order = Order::default();
        order.set_valid(false);

        processor.process(&mut order);

        assert!(order.is_processed());
        assert!(order.order_number().is_some());
    }

    #[test]
    fn same_seed_assigns_same_numbers() {
        let mut a = OrderProcessor::seeded(99);
        let mut b = OrderProcessor::seeded(99);
        let (mut x, mut y) = (Order::default(), Order::default());

        a.process(&mut x);
        b.process(&mut y);

        assert_eq!(x.order_number(), y.order_number());
    }
}
