use crate::{Error, Result};
use ndarray::{Array3, ArrayD, ArrayView3, Axis, Ix2, Ix3};

/// Owned buffer in `(height, width, channels)` order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelLast<T> {
    data: Array3<T>,
}

/// Owned buffer in `(channels, height, width)` order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelFirst<T> {
    data: Array3<T>,
}

impl<T: Clone> ChannelLast<T> {
    pub fn new(data: Array3<T>) -> Self {
        Self { data }
    }

    /// Accept `(height, width)` or `(height, width, channels)`.
    ///
    /// A 2-D buffer gains an explicit trailing channel axis of size 1.
    pub fn from_dyn(data: ArrayD<T>) -> Result<Self> {
        let shape = data.shape().to_vec();
        let expected = "(height, width) or (height, width, channels)";

        match data.ndim() {
            2 => {
                let data = data
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| Error::InvalidShape { shape, expected })?;
                Ok(Self::new(data.insert_axis(Axis(2))))
            }
            3 => {
                let data = data
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| Error::InvalidShape { shape, expected })?;
                Ok(Self::new(data))
            }
            _ => Err(Error::InvalidShape { shape, expected }),
        }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn view(&self) -> ArrayView3<'_, T> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array3<T> {
        self.data
    }

    pub fn into_channel_first(self) -> ChannelFirst<T> {
        let data = self
            .data
            .permuted_axes([2, 0, 1])
            .as_standard_layout()
            .into_owned();
        ChannelFirst { data }
    }
}

impl<T: Clone> ChannelFirst<T> {
    pub fn new(data: Array3<T>) -> Self {
        Self { data }
    }

    pub fn channels(&self) -> usize {
        self.data.dim().0
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    pub fn view(&self) -> ArrayView3<'_, T> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array3<T> {
        self.data
    }

    pub fn into_channel_last(self) -> ChannelLast<T> {
        let data = self
            .data
            .permuted_axes([1, 2, 0])
            .as_standard_layout()
            .into_owned();
        ChannelLast { data }
    }
}
