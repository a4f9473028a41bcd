//! Poll-based reassembly of a download stream.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use pin_project_lite::pin_project;

use crate::store::StoreError;

pin_project! {
    /// A future that drains a fragment stream into one byte buffer.
    ///
    /// Fragments append in arrival order; the buffer is owned exclusively
    /// by this future until it resolves. Resolution is exactly-once: the
    /// future yields either the reassembled bytes or the first stream
    /// error, and polling it again afterwards panics.
    pub(crate) struct Assemble<S> {
        #[pin]
        stream: S,
        buf: BytesMut,
        done: bool,
    }
}

impl<S> Assemble<S> {
    /// Wraps a fragment stream for reassembly.
    pub(crate) fn new(stream: S) -> Self {
        Self {
            stream,
            buf: BytesMut::new(),
            done: false,
        }
    }
}

impl<S> Future for Assemble<S>
where
    S: Stream<Item = Result<Bytes, StoreError>>,
{
    type Output = Result<Bytes, StoreError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        if *this.done {
            panic!("Assemble polled after completion");
        }

        loop {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(fragment))) => this.buf.extend_from_slice(&fragment),
                Poll::Ready(Some(Err(e))) => {
                    *this.done = true;
                    return Poll::Ready(Err(e));
                }
                Poll::Ready(None) => {
                    *this.done = true;
                    return Poll::Ready(Ok(std::mem::take(this.buf).freeze()));
                }
            }
        }
    }
}
