use crate::display::interface::Display;
use crate::identifier::core::Msg;
use crate::image_classifier::gateway::ModelGateway;
use crate::image_source::loader::ImageLoader;
use crate::library::logger::interface::Logger;
use crate::lookup::interface::Lookup;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Wires the gateways and a display around the session state machine.
#[derive(Clone)]
pub struct Identifier {
    pub msg_sender: Sender<Msg>,
    pub msg_receiver: Arc<Mutex<Receiver<Msg>>>,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub model_gateway: Arc<ModelGateway>,
    pub image_loader: Arc<ImageLoader>,
    pub lookup: Arc<dyn Lookup + Send + Sync>,
    pub display: Arc<Mutex<dyn Display + Send>>,
}

impl Identifier {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        model_gateway: Arc<ModelGateway>,
        image_loader: Arc<ImageLoader>,
        lookup: Arc<dyn Lookup + Send + Sync>,
        display: Arc<Mutex<dyn Display + Send>>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();

        Self {
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
            logger: logger.with_namespace("identifier"),
            model_gateway,
            image_loader,
            lookup,
            display,
        }
    }

    /// Handle for the presentation layer to send user intents.
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_sender.clone()
    }

    pub(crate) fn send(&self, msg: Msg) {
        if self.msg_sender.send(msg).is_err() {
            let _ = self.logger.error("Message loop is gone, dropping message");
        }
    }
}
