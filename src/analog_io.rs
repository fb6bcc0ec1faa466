//! Label-based discovery of analog I/O nodes.
//!
//! Supplies, the multimeter and the system monitor live in one channel/node address space whose
//! layout differs between models, so nodes are located by channel label and node name.

use crate::Result;
use crate::sys::{Driver, Handle};

/// Location of a node in the analog I/O address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAddress {
    pub channel: i32,
    pub node: i32,
}

/// Returns the first channel labelled `label`.
pub(crate) fn find_channel<D: Driver>(driver: &D, hdwf: Handle, label: &str) -> Result<Option<i32>> {
    let count = driver.analog_io_channel_count(hdwf)?;
    for channel in 0..count {
        match driver.analog_io_channel_name(hdwf, channel) {
            Ok((_, channel_label)) if channel_label == label => return Ok(Some(channel)),
            Ok(_) => (),
            Err(err) => log::trace!("find_channel: skipping channel {}: {}", channel, err),
        }
    }
    Ok(None)
}

/// Returns the index of the node `name` within `channel`.
pub(crate) fn find_channel_node<D: Driver>(driver: &D, hdwf: Handle, channel: i32, name: &str)
        -> Option<i32> {
    let count = match driver.analog_io_channel_info(hdwf, channel) {
        Ok(count) => count,
        Err(err) => {
            log::trace!("find_channel_node: skipping channel {}: {}", channel, err);
            return None
        }
    };
    (0..count).find(|&node| {
        matches!(driver.analog_io_channel_node_name(hdwf, channel, node),
                 Ok((node_name, _)) if node_name == name)
    })
}

/// Tries each of `labels` in order and returns the first channel with that label that has a node
/// called `name`. Channels or nodes that cannot be read are skipped.
pub(crate) fn find_node<D: Driver>(driver: &D, hdwf: Handle, labels: &[&str], name: &str)
        -> Result<Option<NodeAddress>> {
    let count = driver.analog_io_channel_count(hdwf)?;
    for label in labels {
        for channel in 0..count {
            match driver.analog_io_channel_name(hdwf, channel) {
                Ok((_, channel_label)) if channel_label == *label => (),
                _ => continue,
            }
            if let Some(node) = find_channel_node(driver, hdwf, channel, name) {
                log::trace!("find_node({:?}, {:?}) = {}/{}", label, name, channel, node);
                return Ok(Some(NodeAddress { channel, node }))
            }
        }
    }
    Ok(None)
}

pub(crate) fn set_node<D: Driver>(driver: &D, hdwf: Handle, address: NodeAddress, value: f64)
        -> Result<()> {
    driver.analog_io_channel_node_set(hdwf, address.channel, address.node, value)
}

pub(crate) fn read_node<D: Driver>(driver: &D, hdwf: Handle, address: NodeAddress) -> Result<f64> {
    driver.analog_io_channel_node_status(hdwf, address.channel, address.node)
}
