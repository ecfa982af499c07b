//! Netlink route socket for link/neighbour dumps and neighbour deletion
//!
//! Requests are sent synchronously on a single NETLINK_ROUTE socket and the
//! caller blocks until the kernel has answered (end of dump or ack).

#[cfg(target_os = "linux")]
mod linux {
    use crate::error::{KernelError, NeighDeleteError, Result};
    use crate::executor::{NeighbourBackend, NeighbourCache};
    use crate::link_cache::LinkCache;
    use crate::types::NeighbourEntry;
    use neigh_types::{AddressFamily, LinkLayerAddress, NeighbourAddress, NeighbourState};
    use netlink_packet_core::{
        NLM_F_ACK, NLM_F_DUMP, NLM_F_REQUEST, NetlinkMessage, NetlinkPayload,
    };
    use netlink_packet_route::RouteNetlinkMessage;
    use netlink_packet_route::link::{LinkAttribute, LinkMessage};
    use netlink_packet_route::neighbour::{
        NeighbourAddress as NlNeighbourAddress, NeighbourAttribute, NeighbourMessage,
    };
    use netlink_sys::{Socket, SocketAddr, protocols::NETLINK_ROUTE};
    use nix::errno::Errno;
    use std::net::IpAddr;
    use tracing::{debug, instrument, trace};

    /// Netlink socket connected to the kernel routing subsystem
    pub struct NetlinkSocket {
        socket: Socket,
        sequence: u32,
    }

    impl NetlinkSocket {
        /// Open and connect a NETLINK_ROUTE socket
        #[instrument]
        pub fn connect() -> Result<Self> {
            let context = "Unable to connect netlink socket";

            let mut socket = Socket::new(NETLINK_ROUTE)
                .map_err(|e| NeighDeleteError::connection(context, e))?;
            socket
                .bind_auto()
                .map_err(|e| NeighDeleteError::connection(context, e))?;
            socket
                .connect(&SocketAddr::new(0, 0))
                .map_err(|e| NeighDeleteError::connection(context, e))?;

            debug!("Netlink route socket connected");
            Ok(Self {
                socket,
                sequence: 0,
            })
        }

        /// Dump all links into a name/index table
        #[instrument(skip(self))]
        pub fn alloc_link_cache(&mut self) -> Result<LinkCache> {
            let replies = self
                .request(
                    RouteNetlinkMessage::GetLink(LinkMessage::default()),
                    NLM_F_REQUEST | NLM_F_DUMP,
                )
                .map_err(|e| NeighDeleteError::connection("Unable to allocate link cache", e))?;

            let links: LinkCache = replies
                .into_iter()
                .filter_map(|msg| match msg {
                    RouteNetlinkMessage::NewLink(link) => link_name(&link),
                    _ => None,
                })
                .collect();

            debug!(count = links.len(), "Link cache populated");
            Ok(links)
        }

        /// Dump the neighbour table of every address family
        #[instrument(skip(self, links))]
        pub fn alloc_neigh_cache(&mut self, links: &LinkCache) -> Result<NeighbourCache> {
            let replies = self
                .request(
                    RouteNetlinkMessage::GetNeighbour(NeighbourMessage::default()),
                    NLM_F_REQUEST | NLM_F_DUMP,
                )
                .map_err(|e| {
                    NeighDeleteError::connection("Unable to allocate neighbour cache", e)
                })?;

            let cache: NeighbourCache = replies
                .into_iter()
                .filter_map(|msg| match msg {
                    RouteNetlinkMessage::NewNeighbour(neigh) => parse_neighbour(&neigh, links),
                    _ => None,
                })
                .collect();

            debug!(count = cache.len(), "Neighbour cache populated");
            Ok(cache)
        }

        /// Send `payload` and collect replies until the dump ends or the kernel acks
        fn request(
            &mut self,
            payload: RouteNetlinkMessage,
            flags: u16,
        ) -> std::result::Result<Vec<RouteNetlinkMessage>, KernelError> {
            self.sequence = self.sequence.wrapping_add(1);
            let sequence = self.sequence;

            let mut packet = NetlinkMessage::from(payload);
            packet.header.flags = flags;
            packet.header.sequence_number = sequence;
            packet.finalize();

            let mut buf = vec![0u8; packet.buffer_len()];
            packet.serialize(&mut buf);
            self.socket.send(&buf, 0)?;

            let mut replies = Vec::new();
            loop {
                let (recv_buf, _) = self.socket.recv_from_full()?;
                let mut view = &recv_buf[..];

                while !view.is_empty() {
                    let msg = NetlinkMessage::<RouteNetlinkMessage>::deserialize(view)
                        .map_err(|e| KernelError::new(Some(libc::EBADMSG), e.to_string()))?;
                    let len = msg.header.length as usize;
                    if len == 0 || len > view.len() {
                        return Err(KernelError::new(
                            Some(libc::EBADMSG),
                            "Received a malformed netlink message (invalid length)",
                        ));
                    }
                    view = &view[len..];

                    if msg.header.sequence_number != sequence {
                        trace!(
                            sequence = msg.header.sequence_number,
                            "Ignoring reply to another request"
                        );
                        continue;
                    }

                    match msg.payload {
                        NetlinkPayload::InnerMessage(inner) => replies.push(inner),
                        NetlinkPayload::Done(_) => return Ok(replies),
                        NetlinkPayload::Error(err) => {
                            return match err.code {
                                None => Ok(replies),
                                Some(code) => Err(errno_error(code.get())),
                            };
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    impl NeighbourBackend for NetlinkSocket {
        #[instrument(skip_all, fields(entry = %entry))]
        fn delete_neighbour(
            &mut self,
            entry: &NeighbourEntry,
        ) -> std::result::Result<(), KernelError> {
            let mut msg = NeighbourMessage::default();
            msg.header.family = entry.family.as_u8().into();
            msg.header.ifindex = entry.ifindex;
            msg.attributes
                .push(NeighbourAttribute::Destination(match entry.destination.ip() {
                    IpAddr::V4(v4) => NlNeighbourAddress::Inet(v4),
                    IpAddr::V6(v6) => NlNeighbourAddress::Inet6(v6),
                }));

            self.request(
                RouteNetlinkMessage::DelNeighbour(msg),
                NLM_F_REQUEST | NLM_F_ACK,
            )?;
            Ok(())
        }
    }

    fn errno_error(code: i32) -> KernelError {
        KernelError::new(Some(code), Errno::from_raw(code.abs()).desc())
    }

    fn link_name(link: &LinkMessage) -> Option<(u32, String)> {
        link.attributes.iter().find_map(|attr| match attr {
            LinkAttribute::IfName(name) => Some((link.header.index, name.clone())),
            _ => None,
        })
    }

    /// Convert a dumped neighbour message, skipping entries without an IP destination
    fn parse_neighbour(msg: &NeighbourMessage, links: &LinkCache) -> Option<NeighbourEntry> {
        let mut destination = None;
        let mut lladdr = LinkLayerAddress::default();

        for attr in &msg.attributes {
            match attr {
                NeighbourAttribute::Destination(NlNeighbourAddress::Inet(v4)) => {
                    destination = Some(NeighbourAddress::from(*v4));
                }
                NeighbourAttribute::Destination(NlNeighbourAddress::Inet6(v6)) => {
                    destination = Some(NeighbourAddress::from(*v6));
                }
                NeighbourAttribute::LinkLocalAddress(bytes) => {
                    lladdr = LinkLayerAddress::new(bytes.clone());
                }
                _ => {}
            }
        }

        let Some(destination) = destination else {
            trace!(ifindex = msg.header.ifindex, "Skipping neighbour without IP destination");
            return None;
        };

        let ifindex = msg.header.ifindex;
        Some(NeighbourEntry {
            ifindex,
            interface: links.display_name(ifindex),
            family: AddressFamily::new(u8::from(msg.header.family)),
            destination,
            lladdr,
            state: NeighbourState::from_bits(u16::from(msg.header.state)),
        })
    }

}

#[cfg(target_os = "linux")]
pub use linux::*;

/// Stand-in for non-Linux platforms, every connection attempt fails
#[cfg(not(target_os = "linux"))]
mod mock {
    use crate::error::{KernelError, NeighDeleteError, Result};
    use crate::executor::{NeighbourBackend, NeighbourCache};
    use crate::link_cache::LinkCache;
    use crate::types::NeighbourEntry;

    pub struct NetlinkSocket;

    impl NetlinkSocket {
        pub fn connect() -> Result<Self> {
            Err(NeighDeleteError::connection(
                "Unable to connect netlink socket",
                KernelError::new(Some(libc::EAFNOSUPPORT), "netlink requires Linux"),
            ))
        }

        pub fn alloc_link_cache(&mut self) -> Result<LinkCache> {
            Ok(LinkCache::default())
        }

        pub fn alloc_neigh_cache(&mut self, _links: &LinkCache) -> Result<NeighbourCache> {
            Ok(NeighbourCache::default())
        }
    }

    impl NeighbourBackend for NetlinkSocket {
        fn delete_neighbour(
            &mut self,
            _entry: &NeighbourEntry,
        ) -> std::result::Result<(), KernelError> {
            Err(KernelError::new(Some(libc::EAFNOSUPPORT), "netlink requires Linux"))
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub use mock::*;
