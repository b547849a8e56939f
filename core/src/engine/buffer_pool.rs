use crate::prelude::{StageError, StageResult};

/// Reusable scratch buffers for the model stages. Checkout hands out a
/// zeroed buffer of the requested length; release returns it for reuse.
pub struct BufferPool {
    spare: Vec<Vec<f64>>,
    loaned: usize,
    capacity: usize,
}

impl BufferPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            spare: Vec::with_capacity(capacity),
            loaned: 0,
            capacity,
        }
    }

    pub fn checkout(&mut self, length: usize) -> StageResult<Vec<f64>> {
        if self.loaned >= self.capacity {
            return Err(StageError::BufferExhaustion(format!(
                "pool capacity {} reached",
                self.capacity
            )));
        }
        self.loaned += 1;
        let mut buffer = self.spare.pop().unwrap_or_default();
        buffer.clear();
        buffer.resize(length, 0.0);
        Ok(buffer)
    }

    pub fn release(&mut self, mut buffer: Vec<f64>) {
        buffer.clear();
        self.loaned = self.loaned.saturating_sub(1);
        self.spare.push(buffer);
    }

    pub fn reset(&mut self) {
        self.spare.clear();
        self.loaned = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_zeroes_recycled_buffers() {
        let mut pool = BufferPool::with_capacity(2);
        let mut buffer = pool.checkout(3).unwrap();
        buffer.fill(9.0);
        pool.release(buffer);
        let recycled = pool.checkout(4).unwrap();
        assert_eq!(recycled, vec![0.0; 4]);
    }

    #[test]
    fn exhausted_pool_reports_error() {
        let mut pool = BufferPool::with_capacity(1);
        let _held = pool.checkout(2).unwrap();
        assert!(matches!(
            pool.checkout(2),
            Err(StageError::BufferExhaustion(_))
        ));
    }
}
